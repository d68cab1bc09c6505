use super::catalog::print_movies;
use super::context::App;
use super::spinner::with_spinner;
use crate::format;
use crate::output::Output;
use crate::{ProgressCommands, WatchlistCommands};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_models::{MovieId, MovieSummary};
use movieflix_sources::MovieCatalog;
use serde_json::json;
use std::collections::HashSet;
use tracing::warn;

pub async fn run_watchlist(app: &mut App, cmd: WatchlistCommands, output: &Output) -> Result<()> {
    match cmd {
        WatchlistCommands::List => {
            let movies = app.store.watchlist().list();
            if movies.is_empty() && !output.is_json() {
                output.info("Your watchlist is empty. Add movies with 'movieflix watchlist add <id>'");
                return Ok(());
            }
            let ids: HashSet<MovieId> = movies.iter().map(|m| m.id).collect();
            print_movies(&format!("My Watchlist ({})", movies.len()), &movies, &ids, output);
            Ok(())
        }
        WatchlistCommands::Add { id } => {
            if app.store.watchlist().contains(id) {
                output.info(format!("Movie {} is already in your watchlist", id));
                return Ok(());
            }
            let movie = fetch_summary(app, id, output).await?;
            if app.store.watchlist().add(movie.clone()) {
                output.success(format!("Added {} to your watchlist", movie.title));
            } else {
                output.error(format!("Could not save {} to your watchlist", movie.title));
            }
            Ok(())
        }
        WatchlistCommands::Remove { id } => {
            if app.store.watchlist().remove(id) {
                output.success(format!("Removed movie {} from your watchlist", id));
            } else {
                output.warn(format!("Movie {} is not in your watchlist", id));
            }
            Ok(())
        }
        WatchlistCommands::Refresh => refresh_watchlist(app, output).await,
        WatchlistCommands::Clear => {
            if app.store.watchlist().clear() {
                output.success("Watchlist cleared");
            } else {
                output.info("Watchlist already empty");
            }
            Ok(())
        }
    }
}

/// Re-fetch every saved movie and replace stale summaries in place
async fn refresh_watchlist(app: &mut App, output: &Output) -> Result<()> {
    let saved = app.store.watchlist().list();
    if saved.is_empty() {
        output.info("Your watchlist is empty");
        return Ok(());
    }

    let catalog = app.catalog()?;
    let results = with_spinner(output, "Refreshing watchlist...", async {
        futures::future::join_all(saved.iter().map(|m| catalog.movie_details(m.id))).await
    })
    .await;

    let mut updated = 0;
    for (movie, result) in saved.iter().zip(results) {
        match result {
            Ok(details) => {
                if app.store.watchlist().update(details.summary()) {
                    updated += 1;
                }
            }
            Err(e) => warn!("Could not refresh {} ({}): {}", movie.title, movie.id, e),
        }
    }
    output.success(format!("Refreshed watchlist: {} of {} entries updated", updated, saved.len()));
    Ok(())
}

pub fn run_rate(app: &mut App, id: MovieId, stars: i64, output: &Output) -> Result<()> {
    let saved = app
        .store
        .ratings()
        .set_rating(id, stars)
        .map_err(|e| eyre!("Cannot rate movie {}: {}", id, e))?;
    if !saved {
        output.error(format!("Could not save rating for movie {}", id));
        return Ok(());
    }
    output.success(format!(
        "Rated movie {} {} ({}/5)",
        id,
        format::stars(stars as f64),
        stars
    ));
    Ok(())
}

pub fn run_rating(app: &mut App, id: Option<MovieId>, remove: bool, output: &Output) -> Result<()> {
    let Some(id) = id else {
        let all = app.store.ratings().all();
        if output.is_json() {
            let ratings: Vec<_> = all
                .iter()
                .map(|(id, r)| json!({"movie_id": id, "rating": r.get()}))
                .collect();
            output.json(&ratings);
            return Ok(());
        }
        if all.is_empty() {
            output.info("You haven't rated any movies yet");
            return Ok(());
        }
        let mut table = output.table(&["Movie ID", "Rating", ""]);
        for (id, rating) in &all {
            table.add_row(vec![
                Cell::new(id),
                Cell::new(format::stars(f64::from(rating.get()))),
                Cell::new(rating),
            ]);
        }
        output.heading(format!("My Ratings ({})", all.len()));
        output.print_table(&table);
        return Ok(());
    };

    if remove {
        if app.store.ratings().remove_rating(id) {
            output.success(format!("Removed your rating for movie {}", id));
        } else {
            output.warn(format!("Movie {} has no rating", id));
        }
        return Ok(());
    }

    let rating = app.store.ratings().get_rating(id);
    if output.is_json() {
        output.json(&json!({"movie_id": id, "rating": rating.map(|r| r.get())}));
        return Ok(());
    }
    match rating {
        Some(r) => output.info(format!(
            "Movie {}: {} ({})",
            id,
            format::stars(f64::from(r.get())),
            r
        )),
        None => output.info(format!("Movie {} is not rated", id)),
    }
    Ok(())
}

pub async fn run_progress(app: &mut App, cmd: ProgressCommands, output: &Output) -> Result<()> {
    match cmd {
        ProgressCommands::List => {
            let entries = app.store.continue_watching().list();
            if output.is_json() {
                output.json(&entries);
                return Ok(());
            }
            if entries.is_empty() {
                output.info("Nothing in progress");
                return Ok(());
            }
            let mut table = output.table(&["ID", "Title", "Progress"]);
            for entry in &entries {
                table.add_row(vec![
                    Cell::new(entry.id()),
                    Cell::new(&entry.movie.title),
                    Cell::new(format::progress(entry.progress)),
                ]);
            }
            output.heading("Continue Watching");
            output.table_or_json(table, &entries);
            Ok(())
        }
        ProgressCommands::Set { id, progress } => {
            // Known movies only need their progress replaced
            let existing = app.store.continue_watching().get(id);
            if let Some(entry) = existing {
                let saved = app
                    .store
                    .continue_watching()
                    .update_progress(id, progress)
                    .map_err(|e| eyre!("Cannot record progress: {}", e))?;
                if !saved {
                    output.error(format!("Could not save progress for {}", entry.movie.title));
                    return Ok(());
                }
                output.success(format!(
                    "{}: {} watched",
                    entry.movie.title,
                    format::progress(progress)
                ));
                return Ok(());
            }

            if !movieflix_models::ContinueWatchingEntry::is_valid_progress(progress) {
                return Err(eyre!(
                    "Cannot record progress: progress must be between 0 and 1, got {}",
                    progress
                ));
            }
            let movie = fetch_summary(app, id, output).await?;
            let title = movie.title.clone();
            let saved = app
                .store
                .continue_watching()
                .upsert(movie, progress)
                .map_err(|e| eyre!("Cannot record progress: {}", e))?;
            if !saved {
                output.error(format!("Could not save progress for {}", title));
                return Ok(());
            }
            output.success(format!("{}: {} watched", title, format::progress(progress)));
            Ok(())
        }
        ProgressCommands::Remove { id } => {
            if app.store.continue_watching().remove(id) {
                output.success(format!("Removed movie {} from continue watching", id));
            } else {
                output.warn(format!("Movie {} is not in continue watching", id));
            }
            Ok(())
        }
    }
}

async fn fetch_summary(app: &App, id: MovieId, output: &Output) -> Result<MovieSummary> {
    let catalog = app.catalog()?;
    let details = with_spinner(output, "Loading movie...", catalog.movie_details(id))
        .await
        .wrap_err_with(|| format!("Failed to load movie {}", id))?;
    Ok(details.summary())
}
