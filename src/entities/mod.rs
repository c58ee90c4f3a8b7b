//! Store documents. Each module follows the sea-orm entity layout
//! (`Model`, `ActiveModel`, `Relation`).

pub mod facility;
pub mod notification;
pub mod operation;
pub mod operation_type;
pub mod space;
pub mod space_type;
