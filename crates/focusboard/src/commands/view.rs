use crate::cli::FilterArgs;

pub fn run(filter: &FilterArgs) -> anyhow::Result<()> {
    let (paths, config) = super::load_config()?;
    let response = super::pipeline(&paths, &config).view(&filter.to_request())?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
