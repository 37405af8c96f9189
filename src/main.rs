use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_feed::view::{Body, Screen};
use course_feed::{FetchController, FetchState, HttpCourseSource, SourceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_feed=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SourceConfig::from_env()?;
    info!("fetching courses from {}", config.endpoint);

    let source = Arc::new(HttpCourseSource::new(config)?);
    let controller = Arc::new(FetchController::new(source));

    let mut rx = controller.subscribe();
    tokio::spawn(async move {
        let state = rx.borrow_and_update().clone();
        render(&state);
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            render(&state);
        }
    });

    controller.mount();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "r" | "refresh" => {
                controller.refresh();
            }
            "q" | "quit" => break,
            "" => {}
            other => println!("unknown command {:?} (r = refresh, q = quit)", other),
        }
    }

    Ok(())
}

fn render(state: &FetchState) {
    println!("== {} ==  [{}: r]", Screen::TITLE, Screen::REFRESH_LABEL);
    match Body::from_state(state) {
        Body::Loading => println!("  loading..."),
        Body::Error(message) => println!("  {}", message),
        Body::List(rows) => {
            for row in rows {
                match row.image {
                    Some(url) => println!("  {}  <{}>", row.name, url),
                    None => println!("  {}", row.name),
                }
            }
        }
    }
}
