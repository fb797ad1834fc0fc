//! Supplies API payloads.
//!
//! Payloads are parsed into these shapes at the fetch boundary and converted
//! into domain types immediately; a schema mismatch fails the whole fetch.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::domain::{CoefficientRecord, Warehouse, WarehouseId};

/// One element of `GET /acceptance/coefficients`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientDto {
    pub date: DateTime<FixedOffset>,
    pub coefficient: i32,
    #[serde(rename = "warehouseID", default)]
    pub warehouse_id: Option<i64>,
    pub warehouse_name: String,
    pub box_type_name: String,
}

impl From<CoefficientDto> for CoefficientRecord {
    fn from(dto: CoefficientDto) -> Self {
        // Slot dates are compared as UTC calendar dates.
        let date = dto.date.with_timezone(&Utc).date_naive();
        let record = Self::new(dto.warehouse_name, date, dto.coefficient, dto.box_type_name);
        match dto.warehouse_id {
            Some(id) => record.with_warehouse_id(WarehouseId::new(id)),
            None => record,
        }
    }
}

/// One element of `GET /warehouses`.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseDto {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
}

impl From<WarehouseDto> for Warehouse {
    fn from(dto: WarehouseDto) -> Self {
        Self::new(WarehouseId::new(dto.id), dto.name)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parses_coefficient_payload() {
        let json = r#"[
            {"date":"2026-10-24T00:00:00Z","coefficient":0,"warehouseID":117986,
             "warehouseName":"Казань","boxTypeName":"Короба","boxTypeID":2},
            {"date":"2026-10-25T00:00:00Z","coefficient":-1,"warehouseID":117986,
             "warehouseName":"Казань","boxTypeName":"Монопаллеты","boxTypeID":5}
        ]"#;

        let dtos: Vec<CoefficientDto> = serde_json::from_str(json).unwrap();
        let records: Vec<CoefficientRecord> = dtos.into_iter().map(Into::into).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].warehouse_name, "Казань");
        assert_eq!(records[0].warehouse_id, Some(WarehouseId::new(117_986)));
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2026, 10, 24).unwrap());
        assert_eq!(records[0].box_type_name, "Короба");
        assert!(records[1].is_closed());
    }

    #[test]
    fn offset_dates_are_normalized_to_utc() {
        let json = r#"{"date":"2026-10-24T01:00:00+03:00","coefficient":1,
            "warehouseName":"Тула","boxTypeName":"Короба"}"#;
        let record: CoefficientRecord = serde_json::from_str::<CoefficientDto>(json)
            .unwrap()
            .into();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 10, 23).unwrap());
        assert_eq!(record.warehouse_id, None);
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"date":"2026-10-24T00:00:00Z","warehouseName":"Тула","boxTypeName":"Короба"}"#;
        assert!(serde_json::from_str::<CoefficientDto>(json).is_err());
    }

    #[test]
    fn parses_warehouse_payload() {
        let json = r#"[{"ID":507,"name":"Коледино","workTime":"24/7","acceptsQR":false}]"#;
        let dtos: Vec<WarehouseDto> = serde_json::from_str(json).unwrap();
        let warehouse: Warehouse = dtos.into_iter().next().unwrap().into();
        assert_eq!(warehouse, Warehouse::new(WarehouseId::new(507), "Коледино"));
    }
}
