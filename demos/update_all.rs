use opponent_stats::{Config, StatsClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("opponent_stats=info".parse().unwrap()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path).unwrap(),
        None => Config::default(),
    };
    let client = StatsClient::new(config);

    let summary = client.update_all_today().await.unwrap();
    for (team, error) in &summary.refresh.failed {
        println!("Failed to refresh {team}: {error}");
    }
    println!(
        "Refreshed {} teams, {} already up to date",
        summary.refresh.refreshed.len(),
        summary.refresh.up_to_date.len()
    );

    let report = client.report().unwrap();
    for (team, stats) in &report {
        let points = stats.average.get(&opponent_stats::Stat::Points).copied();
        println!(
            "{team}: {} lines, {:.1} PTS allowed per game",
            stats.games.len(),
            points.unwrap_or_default()
        );
    }
}
