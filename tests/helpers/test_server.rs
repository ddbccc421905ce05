// Test Server Helpers
//
// Spawns a real HTTP server on a random port with actix-test. The server
// stops when the returned TestServer is dropped.

use actix_web::App;

pub use actix_test::TestServer;

use stockroom::middleware::RequestId;
use stockroom::unit_of_work::MemoryStore;
use stockroom::AppState;

/// Spawn the full application over `store`
pub fn spawn_test_server(store: &MemoryStore) -> TestServer {
    let state = AppState::in_memory(store.clone());

    actix_test::start(move || {
        let state = state.clone();
        App::new()
            .wrap(RequestId)
            .configure(|cfg| state.configure(cfg))
    })
}
