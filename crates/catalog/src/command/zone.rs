// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{
	params::{AlterZoneParams, CreateZoneParams, DropZoneParams, RenameZoneParams},
	validate,
};
use crate::{
	Catalog, CatalogManager, CatalogVersion, ObjectKind, Result, UpdateEntry, ValidationError,
	descriptor::{ZoneDescriptor, ZoneId},
};

impl CatalogManager {
	pub async fn create_zone(&self, params: CreateZoneParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| create_zone(catalog, &params)).await
	}

	/// Fails while any table is assigned to the zone. The default zone can't
	/// be dropped.
	pub async fn drop_zone(&self, params: DropZoneParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| drop_zone(catalog, &params)).await
	}

	/// The default zone can't be renamed.
	pub async fn rename_zone(&self, params: RenameZoneParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| rename_zone(catalog, &params)).await
	}

	pub async fn alter_zone(&self, params: AlterZoneParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| alter_zone(catalog, &params)).await
	}
}

pub(crate) fn create_zone(catalog: &Catalog, params: &CreateZoneParams) -> Result<Vec<UpdateEntry>> {
	validate::zone_name(&params.zone_name)?;
	if catalog.zone(&params.zone_name).is_some() {
		return Err(ValidationError::duplicate(ObjectKind::Zone, &params.zone_name).into());
	}

	let defaults = ZoneDescriptor::new(ZoneId(catalog.object_id_counter()), params.zone_name.clone());
	let zone = ZoneDescriptor {
		partitions: params.partitions.unwrap_or(defaults.partitions),
		replicas: params.replicas.unwrap_or(defaults.replicas),
		data_nodes_auto_adjust: params.data_nodes_auto_adjust.unwrap_or(defaults.data_nodes_auto_adjust),
		data_nodes_auto_adjust_scale_up: params
			.data_nodes_auto_adjust_scale_up
			.unwrap_or(defaults.data_nodes_auto_adjust_scale_up),
		data_nodes_auto_adjust_scale_down: params
			.data_nodes_auto_adjust_scale_down
			.unwrap_or(defaults.data_nodes_auto_adjust_scale_down),
		filter: params.filter.clone().unwrap_or_else(|| defaults.filter.clone()),
		..defaults
	};
	validate::zone_definition(&zone)?;

	Ok(vec![
		UpdateEntry::NewZone {
			zone,
		},
		UpdateEntry::ObjectIdGenUpdate {
			delta: 1,
		},
	])
}

pub(crate) fn drop_zone(catalog: &Catalog, params: &DropZoneParams) -> Result<Vec<UpdateEntry>> {
	validate::zone_name(&params.zone_name)?;
	let zone = validate::zone(catalog, &params.zone_name)?;

	if zone.is_default() {
		return Err(ValidationError::DefaultZoneProtected("default zone can't be dropped".to_string()).into());
	}

	if let Some(table) = catalog.tables().find(|t| t.zone_id == zone.id) {
		return Err(ValidationError::ZoneBoundToTable {
			zone: zone.name.clone(),
			table: table.name.clone(),
		}
		.into());
	}

	Ok(vec![UpdateEntry::DropZone {
		zone_id: zone.id,
	}])
}

pub(crate) fn rename_zone(catalog: &Catalog, params: &RenameZoneParams) -> Result<Vec<UpdateEntry>> {
	validate::zone_name(&params.zone_name)?;
	validate::zone_name(&params.new_zone_name)?;
	let zone = validate::zone(catalog, &params.zone_name)?;

	if catalog.zone(&params.new_zone_name).is_some() {
		return Err(ValidationError::duplicate(ObjectKind::Zone, &params.new_zone_name).into());
	}

	if zone.is_default() {
		return Err(ValidationError::DefaultZoneProtected("default zone can't be renamed".to_string()).into());
	}

	Ok(vec![UpdateEntry::AlterZone {
		zone: ZoneDescriptor {
			name: params.new_zone_name.clone(),
			..zone.as_ref().clone()
		},
	}])
}

pub(crate) fn alter_zone(catalog: &Catalog, params: &AlterZoneParams) -> Result<Vec<UpdateEntry>> {
	validate::zone_name(&params.zone_name)?;
	let origin = validate::zone(catalog, &params.zone_name)?;

	let zone = ZoneDescriptor {
		id: origin.id,
		name: origin.name.clone(),
		partitions: params.partitions.unwrap_or(origin.partitions),
		replicas: params.replicas.unwrap_or(origin.replicas),
		data_nodes_auto_adjust: params.data_nodes_auto_adjust.unwrap_or(origin.data_nodes_auto_adjust),
		data_nodes_auto_adjust_scale_up: params
			.data_nodes_auto_adjust_scale_up
			.unwrap_or(origin.data_nodes_auto_adjust_scale_up),
		data_nodes_auto_adjust_scale_down: params
			.data_nodes_auto_adjust_scale_down
			.unwrap_or(origin.data_nodes_auto_adjust_scale_down),
		filter: params.filter.clone().unwrap_or_else(|| origin.filter.clone()),
	};
	validate::zone_definition(&zone)?;

	Ok(vec![UpdateEntry::AlterZone {
		zone,
	}])
}
