//! Typed row records, one per source table.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Row of `SELECT house FROM tblRealm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseRow {
    /// House id.
    pub house: u32,
}

/// Row of `tblItemSummary`: the latest price summary of an item in a house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummaryRow {
    /// House id.
    pub house: u32,
    /// Item id.
    pub item: u32,
    /// Item level variant.
    pub level: u16,
    /// Market price in copper.
    pub price: u64,
    /// Quantity seen at the last snapshot.
    pub quantity: u32,
    /// Time of the last snapshot.
    pub lastseen: NaiveDateTime,
}

/// Row of `tblDBCItem`: static item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub id: u32,
    pub name_enus: String,
    pub quality: u8,
    pub level: u16,
    pub class: u8,
    pub subclass: u8,
    pub icon: String,
    pub stacksize: u16,
    pub buyfromvendor: Option<u32>,
    pub selltovendor: Option<u32>,
    pub auctionable: bool,
}

impl ItemRow {
    /// Column list selected for item rows, in field order.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "name_enus",
        "quality",
        "level",
        "class",
        "subclass",
        "icon",
        "stacksize",
        "buyfromvendor",
        "selltovendor",
        "auctionable",
    ];
}

impl ItemSummaryRow {
    /// Column list selected for item summary rows, in field order.
    pub const COLUMNS: &'static [&'static str] =
        &["house", "item", "level", "price", "quantity", "lastseen"];
}
