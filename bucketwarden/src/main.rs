// bucketwarden/src/main.rs

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

// Infrastructure (Config & Adapters)
use bucketwarden_core::infrastructure::adapters::memory::{
    PublishBehavior, RecordingAclMutator, RecordingNotifier, StaticPolicyLookup,
};
use bucketwarden_core::infrastructure::adapters::rest::{RestBucketClient, RestTopicNotifier};
use bucketwarden_core::infrastructure::config::load_config;

// Domain (Classification for the CLI)
use bucketwarden_core::domain::compliance::{RemediationPlan, WarningCategory};

// Application (Use Cases)
use bucketwarden_core::application::RemediationEngine;

#[derive(Parser)]
#[command(name = "bucketwarden")]
#[command(about = "Event-driven remediation for publicly exposed storage buckets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 🛡️ Handles one compliance-violation event (reverts ACL + notifies)
    Handle {
        /// Event JSON file; reads stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,

        /// Directory holding bucketwarden.yaml
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,

        /// Record the actions instead of calling the control plane
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// 🔍 Classifies an annotation and prints the decision (no side effects)
    Classify {
        /// The compliance annotation text, verbatim
        annotation: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug bucketwarden handle ... for the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: HANDLE ONE VIOLATION EVENT ---
        Commands::Handle {
            event,
            config_dir,
            dry_run,
        } => {
            // Startup-time fatal if the topic is not configured.
            let config = load_config(&config_dir)?;

            let raw = match event {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let payload: serde_json::Value = serde_json::from_str(&raw)?;

            if dry_run {
                let acl = Arc::new(RecordingAclMutator::new());
                let notifier = Arc::new(RecordingNotifier::new(PublishBehavior::Ack));
                let engine = RemediationEngine::new(
                    Arc::new(StaticPolicyLookup::empty()),
                    acl.clone(),
                    notifier.clone(),
                );

                let outcome = engine.handle(&payload).await?;

                println!("🛡️  Dry run (topic: {})", config.topic_arn);
                for bucket in acl.reverted() {
                    println!("   ACL -> private: {bucket}");
                }
                for (subject, message) in notifier.sent() {
                    println!("   📨 {subject}");
                    println!("      {message}");
                }
                if !outcome.acl_reverted && !outcome.notified {
                    println!("   Nothing to do.");
                }
            } else {
                let endpoint = config.endpoint.clone().ok_or_else(|| {
                    anyhow::anyhow!(
                        "Storage endpoint not configured. Set 'endpoint' in bucketwarden.yaml or export WARDEN_ENDPOINT."
                    )
                })?;

                // Dependency injection happens here: the same client serves
                // as PolicyLookup and AclMutator.
                let bucket_client = Arc::new(RestBucketClient::new(&endpoint));
                let notifier = Arc::new(RestTopicNotifier::new(&endpoint, &config.topic_arn));
                let engine =
                    RemediationEngine::new(bucket_client.clone(), bucket_client, notifier);

                match engine.handle(&payload).await {
                    Ok(outcome) => {
                        if outcome.acl_reverted {
                            println!("✅ ACL reverted to private.");
                        }
                        if outcome.notified {
                            println!(
                                "📨 Notification {}.",
                                if outcome.delivered { "delivered" } else { "NOT acknowledged" }
                            );
                        }
                        if !outcome.acl_reverted && !outcome.notified {
                            println!("Nothing to do.");
                        }
                    }
                    Err(e) => {
                        // A failed ACL revert must be loud: the bucket is
                        // still public. Non-zero exit lets the transport retry.
                        eprintln!("💥 Remediation failed: {e}");
                        std::process::exit(1);
                    }
                }
            }
        }

        // --- USE CASE: CLASSIFY (DECISION PREVIEW) ---
        Commands::Classify { annotation } => match WarningCategory::classify(&annotation) {
            Some(category) => {
                let plan = RemediationPlan::decide(Some(category));
                println!("Category: {category:?}");
                println!(
                    "Revert ACL: {}",
                    if plan.revert_acl { "yes" } else { "no" }
                );
                match plan.notice {
                    Some(notice) => println!("Notify: yes ({notice:?})"),
                    None => println!("Notify: no"),
                }
            }
            None => println!("No action: annotation is not in the known warning set."),
        },
    }

    Ok(())
}
