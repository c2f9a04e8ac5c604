use crate::cli::FilterArgs;
use focusboard_core::Outcome;
use focusboard_report::{ExportFormat, RelayMailer};

pub fn run(filter: &FilterArgs, to: &str, format: ExportFormat) -> anyhow::Result<()> {
    let (paths, config) = super::load_config()?;
    let mailer = RelayMailer::from_config(&config)?;
    let pipeline = super::pipeline(&paths, &config);
    let request = filter.to_request();

    let outcome = super::runtime()?.block_on(pipeline.dispatch(
        &mailer,
        &request,
        format,
        to,
        config.sender.as_deref(),
    ))?;

    match outcome {
        Outcome::Ready(()) => println!("✓ Sent {} export to {}", format.extension(), to),
        Outcome::NoData => println!("{} Nothing sent.", super::NO_DATA_MESSAGE),
    }
    Ok(())
}
