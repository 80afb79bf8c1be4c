//! Offline tool that seeds the catalog store with a shuffled TMDB movie mix,
//! one puzzle per calendar date.

#[cfg(feature = "tool-seed")]
mod seeder;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "tool-seed")]
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(seeder::run())?;
    }
    Ok(())
}
