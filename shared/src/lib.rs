pub mod colors;
pub mod daily;
pub mod geo;
pub mod normalize;
pub mod proximity;
pub mod registry;
pub mod session;
pub mod share;

pub use daily::pick_daily_target;
pub use geo::GeoPoint;
pub use normalize::normalize_name;
pub use proximity::ProximityBand;
pub use registry::*;
pub use session::*;
pub use share::format_share_text;
