pub(crate) mod blur;
pub(crate) mod composite;
pub mod gradient;
pub(crate) mod grain;
pub mod painter;
pub mod pipeline;
pub mod surface;
