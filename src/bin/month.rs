use std::path::Path;

use chrono::Local;

use family_planner::cache::SessionCache;
use family_planner::calendar::MonthCursor;
use family_planner::client::Client;
use family_planner::traits::TaskQuery;
use family_planner::Provider;

const SESSION_FOLDER: &str = "planner_session";


#[tokio::main]
async fn main() {
    env_logger::init();

    let session = SessionCache::from_file_or_new(&SessionCache::default_session_file(Path::new(SESSION_FOLDER)));
    if session.token().is_none() {
        log::warn!("No session token found in {}. The server will probably reject the requests", SESSION_FOLDER);
    }
    let client = match Client::from_config(session) {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid API URL: {}", err);
            return;
        },
    };
    let mut provider = Provider::new(client);

    let today = Local::now().date_naive();
    let cursor = MonthCursor::containing(today);
    let (first, last) = match cursor.bounds() {
        Some(bounds) => bounds,
        None => return,
    };

    if let Err(err) = provider.refresh(&TaskQuery::window(first, last)).await {
        log::error!("Unable to fetch tasks: {}", err);
        return;
    }

    println!("---- {} -----", cursor);
    if let Some(grid) = provider.calendar().month_grid(cursor.year(), cursor.month(), today) {
        family_planner::utils::print_month_grid(&grid);
    }
    println!("---- to do -----");
    family_planner::utils::print_active_tasks(provider.store(), today);
    println!("---- all tasks -----");
    family_planner::utils::print_store(provider.store(), today);
}
