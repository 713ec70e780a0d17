// ABOUTME: Pierre Nutrition CLI - run the nutrition pipeline against local files and providers
// ABOUTME: Summarizes food logs, scales payloads, recommends goals and searches providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Daily totals with goal progress
//! pierre-nutrition summarize --input entries.json --goal-calories 2200
//!
//! # Weekly totals in UTC+02:00
//! pierre-nutrition summarize --input entries.json --granularity week --utc-offset-minutes 120
//!
//! # Log entry for one and a half servings of a saved payload
//! pierre-nutrition scale --input apple.json --multiplier 1.5 --meal-type breakfast
//!
//! # Daily calorie goal
//! pierre-nutrition recommend --weight-kg 70 --height-cm 175 --age 30 --sex male --activity lightly_active --goal lose
//!
//! # Search a configured provider
//! pierre-nutrition search --provider fatsecret banana
//! ```

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pierre_nutrition::logging::LoggingConfig;
use pierre_nutrition::models::MealType;
use pierre_nutrition::pipeline::{ActivityLevel, Gender, Granularity, WeightGoal};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "pierre-nutrition",
    about = "Pierre Nutrition pipeline CLI",
    long_about = "Normalize provider payloads into food log entries and aggregate food logs against nutrition goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Provider selection for `search`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderChoice {
    Nutritionix,
    Fatsecret,
    /// Built-in sample foods, no network
    Mock,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Aggregate food log entries into buckets with goal progress
    Summarize {
        /// JSON file with an array of food log entries
        #[arg(long)]
        input: PathBuf,

        /// Bucket size: day, week or month
        #[arg(long, default_value = "day")]
        granularity: Granularity,

        /// Offset from UTC, in minutes, whose calendar defines buckets
        /// (defaults to `NUTRITION_BUCKET_UTC_OFFSET_MINUTES`)
        #[arg(long, allow_negative_numbers = true)]
        utc_offset_minutes: Option<i32>,

        /// Daily calorie goal (defaults to the configured goal)
        #[arg(long)]
        goal_calories: Option<f64>,
    },

    /// Adapt and scale a provider payload into a food log entry
    Scale {
        /// JSON file with a Nutritionix or FatSecret food payload
        #[arg(long)]
        input: PathBuf,

        /// Portion multiplier
        #[arg(long, default_value_t = 1.0)]
        multiplier: f64,

        /// Meal type: breakfast, lunch, dinner or snack
        #[arg(long, default_value = "snack")]
        meal_type: MealType,

        /// Owner of the entry (random when omitted)
        #[arg(long)]
        user_id: Option<Uuid>,
    },

    /// Recommend a daily calorie goal from body metrics
    Recommend {
        /// Body weight in kilograms
        #[arg(long)]
        weight_kg: f64,

        /// Height in centimeters
        #[arg(long)]
        height_cm: f64,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// Sex used by the BMR formula: male or female
        #[arg(long)]
        sex: Gender,

        /// Activity level, e.g. sedentary or moderately_active
        #[arg(long, default_value = "sedentary")]
        activity: ActivityLevel,

        /// Weight goal: lose, maintain or gain
        #[arg(long, default_value = "maintain")]
        goal: WeightGoal,
    },

    /// Search foods on a provider
    Search {
        /// Provider to query
        #[arg(long, value_enum, default_value_t = ProviderChoice::Mock)]
        provider: ProviderChoice,

        /// Maximum number of results (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Food name to search for
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    match cli.command {
        Command::Summarize {
            input,
            granularity,
            utc_offset_minutes,
            goal_calories,
        } => {
            commands::summarize(&input, granularity, utc_offset_minutes, goal_calories)?;
        }
        Command::Scale {
            input,
            multiplier,
            meal_type,
            user_id,
        } => {
            commands::scale(&input, multiplier, meal_type, user_id)?;
        }
        Command::Recommend {
            weight_kg,
            height_cm,
            age,
            sex,
            activity,
            goal,
        } => {
            commands::recommend(weight_kg, height_cm, age, sex, activity, goal)?;
        }
        Command::Search {
            provider,
            limit,
            query,
        } => {
            commands::search(provider, &query, limit).await?;
        }
    }

    Ok(())
}
