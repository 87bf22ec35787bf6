//! Command-line front end for the koyomi MyAnimeList client.
//!
//! One subcommand per query descriptor. The API key comes from
//! `--api-key` or the `MAL_CLIENT_ID` environment variable.

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use koyomi::{
    Anime, Client, DetailQuery, FieldSet, ListPage, RankingPage, RankingQuery, RankingType,
    SearchQuery, Season, SeasonSort, SeasonalQuery, Selector,
};

#[derive(Parser, Debug)]
#[command(name = "koyomi-cli", version, about = "Query the public MyAnimeList v2 API")]
struct Args {
    /// MAL API client id; falls back to $MAL_CLIENT_ID
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search anime by title
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Comma-separated field names, e.g. "id,title,mean"
        #[arg(short, long)]
        fields: Option<String>,
        /// Follow up to N further pages
        #[arg(long, default_value_t = 0)]
        follow: u32,
    },
    /// Look up one anime by its MAL id
    Detail {
        id: u64,
        #[arg(short, long)]
        fields: Option<String>,
    },
    /// Top-ranked anime
    Ranking {
        /// One of: all, airing, upcoming, tv, ova, movie, special,
        /// bypopularity, favorite
        #[arg(long, default_value = "all")]
        ranking_type: RankingType,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(short, long)]
        fields: Option<String>,
        #[arg(long, default_value_t = 0)]
        follow: u32,
    },
    /// Seasonal listing; defaults to the current season
    Season {
        year: Option<u32>,
        /// One of: winter, spring, summer, fall
        season: Option<Season>,
        /// One of: anime_score, anime_num_list_users
        #[arg(long, default_value = "anime_score")]
        sort: SeasonSort,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(short, long)]
        fields: Option<String>,
        #[arg(long, default_value_t = 0)]
        follow: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("koyomi=warn")),
        )
        .init();

    let args = Args::parse();
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("MAL_CLIENT_ID").ok())
        .context("no API key: pass --api-key or set MAL_CLIENT_ID")?;
    let client = Client::new(api_key);

    match args.command {
        Command::Search {
            query,
            limit,
            offset,
            fields,
            follow,
        } => {
            let mut q = SearchQuery::new(query);
            q.limit = limit;
            q.offset = offset;
            q.fields = parse_fields(fields.as_deref());

            let page = client.search(&q).await.context("search failed")?;
            print_listing(&page, args.json)?;
            follow_listing(&client, page, follow, args.json).await?;
        }
        Command::Detail { id, fields } => {
            let q = DetailQuery::new(id).with_fields(parse_fields(fields.as_deref()));
            let anime = client.details(&q).await.context("detail lookup failed")?;
            print_anime(&anime, args.json)?;
        }
        Command::Ranking {
            ranking_type,
            limit,
            offset,
            fields,
            follow,
        } => {
            let mut q = RankingQuery::new(ranking_type);
            q.limit = limit;
            q.offset = offset;
            q.fields = parse_fields(fields.as_deref());

            let mut page = client.ranking(&q).await.context("ranking query failed")?;
            print_ranking(&page, args.json)?;
            for _ in 0..follow {
                if !page.paging.has_next() {
                    break;
                }
                page = client
                    .next_page(&page.paging)
                    .await
                    .context("failed to follow paging")?;
                print_ranking(&page, args.json)?;
            }
        }
        Command::Season {
            year,
            season,
            sort,
            limit,
            offset,
            fields,
            follow,
        } => {
            let year = year.unwrap_or_else(|| chrono::Utc::now().year() as u32);
            let season = season.unwrap_or_else(Season::current);
            let mut q = SeasonalQuery::new(year, season).with_sort(sort);
            q.limit = limit;
            q.offset = offset;
            q.fields = parse_fields(fields.as_deref());

            let page = client.season(&q).await.context("seasonal query failed")?;
            print_listing(&page, args.json)?;
            follow_listing(&client, page, follow, args.json).await?;
        }
    }

    Ok(())
}

/// Turn a comma-separated `--fields` value into a selector set. Names
/// outside the known set are passed through as custom selectors and
/// left for the server to judge.
fn parse_fields(raw: Option<&str>) -> FieldSet {
    raw.map(|list| list.split(',').filter_map(Selector::custom).collect())
        .unwrap_or_default()
}

async fn follow_listing(client: &Client, mut page: ListPage, n: u32, json: bool) -> Result<()> {
    for _ in 0..n {
        if !page.paging.has_next() {
            break;
        }
        page = client
            .next_page(&page.paging)
            .await
            .context("failed to follow paging")?;
        print_listing(&page, json)?;
    }
    Ok(())
}

fn print_listing(page: &ListPage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    for entry in &page.data {
        println!("{:>8}  {}", entry.node.id, entry.node.title);
    }
    Ok(())
}

fn print_ranking(page: &RankingPage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    for entry in &page.data {
        println!("{:>5}  {}", entry.rank.rank, entry.node.title);
    }
    Ok(())
}

fn print_anime(anime: &Anime, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(anime)?);
        return Ok(());
    }
    println!("{} (id {})", anime.title, anime.id);
    if let Some(mean) = anime.mean {
        println!("mean score: {mean}");
    }
    if let Some(episodes) = anime.num_episodes {
        println!("episodes: {episodes}");
    }
    if let Some(ref synopsis) = anime.synopsis {
        println!("\n{synopsis}");
    }
    Ok(())
}
