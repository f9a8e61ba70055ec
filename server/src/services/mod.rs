pub mod feature_loader;
pub mod session_evictor;
