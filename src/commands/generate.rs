//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::SpaceTraveling;

/// Fetch all posts and write the site into the public directory
pub async fn run(app: &SpaceTraveling) -> Result<()> {
    let start = std::time::Instant::now();

    let source = app.source()?;
    let generator = Generator::new(app, &source)?;
    let report = generator.generate().await?;

    if report.skipped > 0 {
        tracing::warn!("Skipped {} posts that could not be rendered", report.skipped);
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts and {} listing pages in {:.2}s",
        report.posts,
        report.listing_pages,
        duration.as_secs_f64()
    );

    Ok(())
}
