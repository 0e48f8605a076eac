use std::path::Path;

use image::Rgba;
use rusqlite::{Connection, OpenFlags, params};
use serde::Deserialize;

use crate::error::{BannerError, BannerResult};

/// The named record sets the banner pipeline looks components up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordSet {
    Gonfalons,
    Decals,
    DecalPrimaryColors,
    DecalSecondaryColors,
    GonfalonColors,
    GonfalonDetails,
    GonfalonDetailColors,
}

impl RecordSet {
    pub fn table(self) -> &'static str {
        match self {
            Self::Gonfalons => "Gonfalons",
            Self::Decals => "Decals",
            Self::DecalPrimaryColors => "DecalPrimaryColors",
            Self::DecalSecondaryColors => "DecalSecondaryColors",
            Self::GonfalonColors => "GonfalonColors",
            Self::GonfalonDetails => "GonfalonDetails",
            Self::GonfalonDetailColors => "GonfalonDetailColors",
        }
    }
}

/// Art record: one or two remote image paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtRecord {
    pub foreground_image_path: String,
    #[serde(default)]
    pub background_image_path: Option<String>,
}

/// Color record as stored: decimal string components, 0-255 each.
#[derive(Debug, Clone, Deserialize)]
struct ColorRecord {
    red: String,
    green: String,
    blue: String,
}

impl ColorRecord {
    fn to_rgba(&self) -> BannerResult<Rgba<u8>> {
        let channel = |name: &str, value: &str| -> BannerResult<u8> {
            value.trim().parse::<u8>().map_err(|_| {
                BannerError::database(format!(
                    "color component '{name}' is not a decimal 0-255 value: '{value}'"
                ))
            })
        };
        Ok(Rgba([
            channel("red", &self.red)?,
            channel("green", &self.green)?,
            channel("blue", &self.blue)?,
            255,
        ]))
    }
}

/// Ids are unsigned 32-bit but may be stored wrapped into a signed value.
/// A stored `-1` therefore denotes the requested id `4294967295`.
pub fn stored_id_to_u32(stored: i64) -> u32 {
    if stored < 0 {
        (stored + 4_294_967_296) as u32
    } else {
        stored as u32
    }
}

fn requested_id_to_stored(id: u32) -> i64 {
    i64::from(id as i32)
}

/// Read-only lookup handle over the reference database.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    pub fn open(path: &Path) -> BannerResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| {
                BannerError::database(format!("open reference db '{}': {e}", path.display()))
            })?;
        Ok(Self { conn })
    }

    pub fn art_record(&self, set: RecordSet, id: u32) -> BannerResult<ArtRecord> {
        let json = self.record_json(set, id)?;
        serde_json::from_str(&json).map_err(|e| {
            BannerError::database(format!("decode {} record {id}: {e}", set.table()))
        })
    }

    pub fn color(&self, set: RecordSet, id: u32) -> BannerResult<Rgba<u8>> {
        let json = self.record_json(set, id)?;
        let record: ColorRecord = serde_json::from_str(&json).map_err(|e| {
            BannerError::database(format!("decode {} record {id}: {e}", set.table()))
        })?;
        record.to_rgba()
    }

    fn record_json(&self, set: RecordSet, id: u32) -> BannerResult<String> {
        tracing::debug!(table = set.table(), id, "catalog lookup");

        // Rows may carry the id either as-is or wrapped into signed 32-bit,
        // so match both encodings of the requested id.
        let sql = format!("SELECT id, json FROM {} WHERE id = ?1 OR id = ?2", set.table());
        let row = self
            .conn
            .query_row(
                &sql,
                params![i64::from(id), requested_id_to_stored(id)],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            );

        match row {
            Ok((stored, json)) => {
                if stored_id_to_u32(stored) != id {
                    return Err(BannerError::database(format!(
                        "{} row id {stored} does not normalize to requested id {id}",
                        set.table()
                    )));
                }
                Ok(json)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(BannerError::not_found(format!(
                "no {} record with id {id}",
                set.table()
            ))),
            Err(e) => Err(BannerError::database(format!(
                "query {} for id {id}: {e}",
                set.table()
            ))),
        }
    }
}
