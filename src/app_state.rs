use crate::config::Config;
use crate::models::{Category, Task};
use crate::repository::{MongoDB, Repository};

#[derive(Clone)]
pub struct AppState {
    pub tasks: Repository<Task>,
    pub categories: Repository<Category>,
    pub config: Config,
}

impl AppState {
    pub fn new(mongodb: &MongoDB, config: Config) -> Self {
        AppState {
            tasks: Repository::new(&mongodb.db),
            categories: Repository::new(&mongodb.db),
            config,
        }
    }
}
