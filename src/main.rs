use clap::{CommandFactory, Parser};
use posta_track::utils::error::exit_codes;
use posta_track::utils::{logger, validation::Validate};
use posta_track::{CliConfig, EventsFormatter, TrackError, Tracker};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::process::exit(run().await);
}

async fn run() -> i32 {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // clap 預設用 2 當用法錯誤，這裡統一成參數錯誤的退出碼
            let _ = e.print();
            return if e.use_stderr() {
                exit_codes::INVALID_ARGUMENTS
            } else {
                exit_codes::SUCCESS
            };
        }
    };

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let tracking_number = match config.tracking_number() {
        Ok(number) => number.to_string(),
        Err(e) => {
            eprintln!("{}", e.user_friendly_message());
            eprintln!("{}", CliConfig::command().render_usage());
            return e.exit_code();
        }
    };

    // 驗證配置
    let settings = match config.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => return report_failure(&e),
    };

    let tracker = Tracker::new(settings.source.build());
    let events = match tracker.track(&settings.tracker, &tracking_number).await {
        Ok(events) => events,
        Err(e) => return report_failure(&e),
    };

    if events.is_empty() && !config.allow_empty {
        eprintln!("No events found for {}", tracking_number);
        return exit_codes::NO_EVENTS_FOUND;
    }

    let formatter = EventsFormatter::new(settings.output);
    let stdout = std::io::stdout();
    if let Err(e) = formatter.print(&events, &mut stdout.lock()) {
        return report_failure(&e);
    }

    exit_codes::SUCCESS
}

fn report_failure(e: &TrackError) -> i32 {
    tracing::error!(
        "❌ Tracking failed: {} (Category: {:?})",
        e,
        e.category()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    e.exit_code()
}
