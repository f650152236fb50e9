mod api;
mod models;
mod render;

pub use api::{TASKS_PATH, TasksApi};
pub use models::{
    NewTask, Priority, PriorityChoice, Task, TaskPatch, TaskQuery, parse_deadline,
    parse_priority_choices,
};
pub use render::{render, render_line};
