pub mod category;
pub mod task;

pub use category::{Category, CategoryRef, CreateCategoryRequest, UpdateCategoryRequest};
pub use task::{
    CreateTaskRequest, Priority, StatusChangeRequest, Task, TaskEditRequest, TaskStatus,
};
