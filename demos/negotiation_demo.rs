use async_trait::async_trait;
use tokio::net::TcpListener;
use url::Url;

use a2a_greenlight::{
    agents::{
        GeneratorAgent, GeneratorEngine, GeneratorInput, MetadataInput, PublicationMetadata,
        ReviewVerdict, ReviewerAgent, ReviewerEngine, ReviewerInput,
    },
    config::AgentEndpoints,
    negotiation::Negotiator,
    server::AgentServer,
};

// Demo engines: the generator drafts a storyboard, the reviewer insists on
// a second scene, and the revision passes.

struct TemplateGenerator;

#[async_trait]
impl GeneratorEngine for TemplateGenerator {
    async fn generate(&self, input: &GeneratorInput) -> anyhow::Result<String> {
        let duration = input.duration_hint.unwrap_or(30.0);
        if input.is_retry {
            Ok(format!(
                "Scene 1: establishing shot, rain on neon signs ({duration}s total).\n\
                 Scene 2: close-up of umbrellas crossing, ambient street sound."
            ))
        } else {
            Ok(format!(
                "Scene 1: establishing shot for '{}' ({duration}s total).",
                input.topic_or_feedback
            ))
        }
    }

    async fn publication_metadata(
        &self,
        input: &MetadataInput,
    ) -> anyhow::Result<PublicationMetadata> {
        Ok(PublicationMetadata {
            title: format!("{} | A Two-Scene Short", input.topic),
            description: format!("A short-form video about {}.", input.topic),
            tags: vec!["shorts".to_string(), "storyboard".to_string()],
        })
    }
}

struct SceneCountReviewer;

#[async_trait]
impl ReviewerEngine for SceneCountReviewer {
    async fn review(&self, input: &ReviewerInput) -> anyhow::Result<ReviewVerdict> {
        if input.content.contains("Scene 2") {
            Ok(ReviewVerdict::approval("Good pacing across both scenes.", 88))
        } else {
            Ok(ReviewVerdict::rejection(
                "Single-scene storyboards feel static. Add a second scene.",
                35,
            ))
        }
    }
}

fn serve_agent(server: AgentServer, listener: TcpListener) {
    tokio::spawn(async move {
        if let Err(e) = server.serve(listener).await {
            eprintln!("agent server stopped: {e}");
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("🚀 A2A Greenlight Negotiation Demo\n");

    // Step 1: Start both agents on ephemeral local ports
    let generator_listener = TcpListener::bind("127.0.0.1:0").await?;
    let generator_url: Url = format!("http://{}", generator_listener.local_addr()?).parse()?;
    serve_agent(
        GeneratorAgent::new(TemplateGenerator).into_server(generator_url.clone()),
        generator_listener,
    );

    let reviewer_listener = TcpListener::bind("127.0.0.1:0").await?;
    let reviewer_url: Url = format!("http://{}", reviewer_listener.local_addr()?).parse()?;
    serve_agent(
        ReviewerAgent::new(SceneCountReviewer).into_server(reviewer_url.clone()),
        reviewer_listener,
    );

    println!("✓ Generator listening on {generator_url}");
    println!("✓ Reviewer listening on {reviewer_url}\n");

    // Step 2: Discover both agents and verify their skills
    println!("📋 Connecting to the agent pair...");
    let endpoints = AgentEndpoints::new(generator_url, reviewer_url);
    let negotiator = match Negotiator::connect(&endpoints).await {
        Ok(negotiator) => {
            println!(
                "✓ Connected: '{}' and '{}'\n",
                negotiator.generator_name(),
                negotiator.reviewer_name()
            );
            negotiator
        }
        Err(e) => {
            eprintln!("✗ Failed to connect: {e}");
            return Ok(());
        }
    };

    // Step 3: Negotiate one piece of content
    println!("💬 Negotiating a storyboard for 'A rainy night in Seoul'...");
    let outcome = negotiator
        .run_negotiation("A rainy night in Seoul", Some(45.0), None)
        .await;

    // Step 4: Replay the conversation
    println!("\n📚 Conversation log:");
    for (i, entry) in outcome.conversation_log.iter().enumerate() {
        println!(
            "  {}. iteration {} | {} ({:?})",
            i + 1,
            entry.iteration,
            entry.agent,
            entry.action
        );
    }

    if outcome.success {
        println!(
            "\n✅ Approved after {} iteration(s) with score {}",
            outcome.iterations, outcome.final_score
        );
        if let Some(content) = &outcome.approved_content {
            println!("\n📝 Approved content:\n{content}");
        }
        if let Some(metadata) = &outcome.metadata {
            println!("\n🏷  Title: {}", metadata.title);
            println!("   Tags: {}", metadata.tags.join(", "));
        }
    } else if let Some(failure) = &outcome.failure {
        println!(
            "\n✗ Negotiation failed after {} iteration(s): {} ({})",
            outcome.iterations, failure.error, failure.kind
        );
    }

    Ok(())
}
