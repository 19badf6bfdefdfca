use clap::Args;
use pomotimer_core::timer::policy::MAX_PLAN_LEN;
use pomotimer_core::timer::{format_clock, plan};
use pomotimer_core::{Config, SessionType};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Number of sessions to show (at most 1000)
    #[arg(
        long,
        short = 'n',
        default_value_t = 8,
        value_parser = clap::value_parser!(u16).range(..=MAX_PLAN_LEN as i64)
    )]
    pub count: u16,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let sessions = plan(&config.settings(), SessionType::Work, 0, usize::from(args.count));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }
    for s in &sessions {
        println!(
            "{:>3}. {:<12} {}",
            s.position,
            s.session_type.label(),
            format_clock(s.duration_secs)
        );
    }
    Ok(())
}
