use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "planar-cli")]
#[command(about = "Polyline codec and flat-plane geometry queries")]
struct Cmd {
    /// Write the JSON result to this file instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Encode "lon,lat;lon,lat;..." as a Google polyline
    Encode {
        #[arg(long)]
        points: String,
    },
    /// Decode a Google polyline into lon/lat points
    Decode { polyline: String },
    /// Area, centroid and perimeter of a simple polygon
    Polygon {
        #[arg(long)]
        points: String,
        /// SRID tag for the coordinates (0 = untagged)
        #[arg(long, default_value_t = 0)]
        srid: u32,
        /// Also test whether "x,y" lies inside
        #[arg(long)]
        contains: Option<String>,
    },
    /// Length, self-intersection and nearest-point queries on a polyline
    Line {
        #[arg(long)]
        points: String,
        #[arg(long, default_value_t = 0)]
        srid: u32,
        /// Project "x,y" onto the line
        #[arg(long)]
        near: Option<String>,
        /// Densify so consecutive points are at most this far apart
        #[arg(long)]
        interpolate: Option<f64>,
    },
    /// Print version information as JSON
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let value = match cmd.action {
        Action::Encode { points } => {
            tracing::info!(points, "encode");
            commands::encode(&points)?
        }
        Action::Decode { polyline } => {
            tracing::info!(polyline, "decode");
            commands::decode(&polyline)?
        }
        Action::Polygon {
            points,
            srid,
            contains,
        } => {
            tracing::info!(points, srid, contains = ?contains, "polygon");
            commands::polygon(&points, srid, contains.as_deref())?
        }
        Action::Line {
            points,
            srid,
            near,
            interpolate,
        } => {
            tracing::info!(points, srid, near = ?near, interpolate = ?interpolate, "line");
            commands::line(&points, srid, near.as_deref(), interpolate)?
        }
        Action::Report => commands::report(),
    };
    output::emit(&value, cmd.out.as_deref())
}
