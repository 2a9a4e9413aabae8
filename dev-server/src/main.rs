//! Development server for the admin stores
//!
//! This binary starts the stub backend with a demo dataset and mounts the
//! admin stores against it, logging what they see. The store clock is
//! mocked but kept in step with real time, so created records carry
//! realistic timestamps.
//!
//! Usage: cargo run -p dev-server

use std::time::Duration;

use admin_store::{AggregateStore, CollectionStore, StoreContext};
use anyhow::Result;
use jiff::Timestamp;
use payloads::{
    AccountDeletionRequest, BlogPost, Booking, Category, Complaint,
    ContactMessage, Notification, Payment, PrivacySection, PromoCode, Resource,
    SubService, TeamMember, Testimonial, User, Worker,
};
use stub_api::telemetry::log_error;
use test_helpers::mock::DevDataset;
use tokio::time::interval;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = stub_api::telemetry::get_subscriber("info".into());
    stub_api::telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting admin development server");

    let port = stub_api::Config::from_env().port;
    let app = test_helpers::spawn_app_on_port(port).await;
    app.time_source.set(Timestamp::now());
    info!("✅ Stub backend running on {}", app.address());

    info!("📊 Setting up demo data...");
    let dataset = DevDataset::create(&app)?;

    info!("🕐 Starting real-time synchronization...");
    start_time_sync_task(&app);

    let mut config = admin_store::Config::from_env();
    config.api_url = app.address();
    let ctx = StoreContext::new(&config, app.time_source.clone());
    info!("🔁 Stores reconcile with {:?}", ctx.reconcile);
    report_stores(&ctx).await;

    info!("🎯 Development server ready!");
    info!("   API: {}/api", app.address());
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}

/// Mount every store the admin screens use and log what each one sees.
async fn report_stores(ctx: &StoreContext) {
    info!("🗂️ Collections:");
    mount::<User>(ctx).await;
    mount::<Worker>(ctx).await;
    mount::<Category>(ctx).await;
    mount::<SubService>(ctx).await;
    mount::<Booking>(ctx).await;
    mount::<Payment>(ctx).await;
    mount::<PromoCode>(ctx).await;
    mount::<Complaint>(ctx).await;
    mount::<Notification>(ctx).await;
    mount::<Testimonial>(ctx).await;
    mount::<TeamMember>(ctx).await;
    mount::<BlogPost>(ctx).await;
    mount::<ContactMessage>(ctx).await;
    mount::<PrivacySection>(ctx).await;
    mount::<AccountDeletionRequest>(ctx).await;

    let dashboard = AggregateStore::dashboard(ctx);
    match dashboard.fetch().await {
        Ok(stats) => {
            info!(
                "📈 Dashboard: {} bookings, revenue {}, {} open complaints",
                stats.total_bookings, stats.total_revenue, stats.open_complaints
            );
            for (status, count) in &stats.bookings_by_status {
                info!("      - {status}: {count}");
            }
        }
        Err(e) => log_error(e),
    }

    let reports = AggregateStore::reports(ctx);
    match reports.fetch().await {
        Ok(reports) => {
            info!(
                "🧾 Reports: average booking {}, commission {}",
                reports.average_booking_amount, reports.platform_commission
            );
            for (service, revenue) in &reports.revenue_by_service {
                info!("      - {service}: {revenue}");
            }
        }
        Err(e) => log_error(e),
    }

    match AggregateStore::top_workers(ctx, 3).fetch().await {
        Ok(top) => {
            for worker in top {
                info!(
                    "   🏅 {} ({} jobs, rating {})",
                    worker.name, worker.completed_jobs, worker.rating
                );
            }
        }
        Err(e) => log_error(e),
    }

    match AggregateStore::recent_bookings(ctx, 3).fetch().await {
        Ok(recent) => {
            for booking in recent {
                info!(
                    "   🕒 #{} {} for {} ({})",
                    booking.id, booking.service_name, booking.customer_name,
                    booking.status
                );
            }
        }
        Err(e) => log_error(e),
    }
}

async fn mount<E: Resource>(ctx: &StoreContext) {
    let store = CollectionStore::<E>::new(ctx);
    match store.fetch_all().await {
        Ok(()) => info!("   {:>3} {}", store.len(), E::LABEL),
        Err(e) => log_error(e),
    }
}

/// Keep the mocked store clock following real time.
fn start_time_sync_task(app: &test_helpers::TestApp) {
    let time_source = app.time_source.clone();

    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(1));
        info!("⏱️ Time sync task started - updating every second");

        loop {
            interval.tick().await;
            time_source.set(Timestamp::now());
        }
    });
}
