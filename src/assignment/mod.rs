mod resolver;

pub use self::resolver::{is_manual_assignment_required, next_unassigned_resource};
