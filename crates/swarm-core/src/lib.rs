pub mod config;
pub mod constants;
pub mod ease;
pub mod error;
pub mod events;
pub mod particle;
pub mod path;
pub mod projection;
pub mod render;
pub mod sampling;
pub mod stage;
pub mod swarm;
pub mod vector;

pub use config::*;
pub use error::*;
pub use events::*;
pub use particle::*;
pub use path::*;
pub use projection::*;
pub use render::*;
pub use sampling::*;
pub use stage::*;
pub use swarm::*;
pub use vector::*;
