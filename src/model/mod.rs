mod category;
mod measured_value;
mod position;
mod resource;

pub use self::category::Category;
pub use self::measured_value::{LinkOutcome, MeasuredValueColumn};
pub use self::position::{Coordinates, Position};
pub use self::resource::{GeneratedResource, ManualResource, Resource, ResourceKind};
