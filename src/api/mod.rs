//! HTTP API handlers for radiomap

pub mod account;
pub mod buildinfo;
pub mod favourite;
pub mod health;
pub mod lookup;
pub mod map;
pub mod search;
pub mod stations;
pub mod ui;
pub mod update;

pub use account::{login, logout, register_page, register_submit};
pub use buildinfo::get_build_info;
pub use favourite::{favourite_page, favourite_submit};
pub use health::health_routes;
pub use lookup::lookup_stations;
pub use map::map_page;
pub use search::search_stations;
pub use stations::stations_page;
pub use ui::{about_page, serve_app_js};
pub use update::update_viewport;
