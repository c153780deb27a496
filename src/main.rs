//! Replay: runs the replay_viewer app.

use bevy::prelude::AppExit;
use replay_viewer::sdk::ReplayViewerBuilder;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();

    match ReplayViewerBuilder::new().env_config() {
        Ok(builder) => builder.build().run(),
        Err(err) => {
            eprintln!("replay: {err}");
            AppExit::from_code(2)
        }
    }
}
