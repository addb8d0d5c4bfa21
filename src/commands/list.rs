//! List published posts

use anyhow::Result;
use std::io::Write;

use crate::content::Post;
use crate::paginator::PostListPaginator;
use crate::SpaceTraveling;

/// Print every published post, in listing order
pub async fn run(app: &SpaceTraveling) -> Result<()> {
    let source = app.source()?;
    let paginator = PostListPaginator::new(&source, app.config.tz()?);
    let posts = paginator.load_all(app.config.per_page.max(1)).await?;

    let stdout = std::io::stdout();
    print_posts(&mut stdout.lock(), &posts)?;
    Ok(())
}

fn print_posts<W: Write>(out: &mut W, posts: &[Post]) -> Result<()> {
    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(
            out,
            "  {:<11} - {} [{}]",
            post.first_publication_date.as_deref().unwrap_or("unpublished"),
            post.data.title,
            post.uid
        )?;
    }
    Ok(())
}
