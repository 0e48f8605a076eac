#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod clip;
pub mod composite;
pub mod encode;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod recolor;

pub use assets::{
    AssetSource, DecalArt, FLAG_OVERLAY_PATH, FLAG_STAFF_PATH, FlagStaff, RemoteAssets,
    decode_image,
};
pub use catalog::{ArtRecord, Catalog, RecordSet, stored_id_to_u32};
pub use composite::{Layer, composite, cover_scale};
pub use encode::{Resolution, read_png_resolution, write_png};
pub use error::{BannerError, BannerResult};
pub use fetch::{AssetFetcher, DEFAULT_BASE_URL, FetchConfig};
pub use pipeline::{Banner, BannerRequest, PNG_QUALITY, render_banner, render_banner_to_file};
