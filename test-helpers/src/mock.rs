//! Demo data for the development server.
//!
//! A small but complete marketplace: categories with sub-services, a few
//! customers and workers, bookings in every state with their payments,
//! plus one or two rows in each content collection so every admin screen
//! has something to show.

use anyhow::Result;
use serde_json::json;

use crate::TestApp;
use crate::fixtures::{
    booking_row, category_row, complaint_row, payment_row, promo_row,
    sub_service_row, user_row, worker_rows,
};

pub struct DevDataset {
    pub categories: usize,
    pub customers: usize,
    pub workers: usize,
    pub bookings: usize,
    pub payments: usize,
}

impl DevDataset {
    pub fn create(app: &TestApp) -> Result<Self> {
        let db = &app.db;

        tracing::info!("🧹 Seeding categories and sub-services");
        let categories = vec![
            category_row(1, "Cleaning", "Active"),
            category_row(2, "Plumbing", "Active"),
            category_row(3, "Electrical", "Active"),
            category_row(4, "Painting", "Inactive"),
        ];
        let category_count = categories.len();
        db.seed("services", categories)?;
        db.seed(
            "subservices",
            [
                sub_service_row(1, 1, "Deep home clean", "45.00"),
                sub_service_row(2, 1, "Sofa shampoo", "20.00"),
                sub_service_row(3, 2, "Leak repair", "30.00"),
                sub_service_row(4, 3, "Socket installation", "15.00"),
            ],
        )?;

        tracing::info!("👤 Seeding customers and workers");
        let customers = vec![
            user_row(1, "Hodan Ali", "hodan@example.com"),
            user_row(2, "Farah Yusuf", "farah@example.com"),
            user_row(3, "Amina Noor", "amina@example.com"),
        ];
        let customer_count = customers.len();
        db.seed("user", customers)?;
        let workers = [
            worker_rows(1, 10, "Abdi Warsame", 42, "4.8"),
            worker_rows(2, 11, "Khadar Omar", 17, "4.5"),
            worker_rows(3, 12, "Sahra Jama", 42, "4.9"),
        ];
        let worker_count = workers.len();
        let (users, staff): (Vec<_>, Vec<_>) = workers.into_iter().unzip();
        db.seed("user", users)?;
        db.seed("staff", staff)?;

        tracing::info!("📅 Seeding bookings and payments");
        let bookings: Vec<_> = [
            (5, "Amina Noor", "Cleaning", "45.00", "Pending", "05 10:00"),
            (4, "Farah Yusuf", "Electrical", "15.00", "Confirmed", "04 16:30"),
            (3, "Hodan Ali", "Plumbing", "30.00", "Completed", "03 09:15"),
            (2, "Farah Yusuf", "Cleaning", "20.00", "Completed", "02 14:00"),
            (1, "Hodan Ali", "Cleaning", "45.00", "Cancelled", "01 11:45"),
        ]
        .into_iter()
        .map(|(id, customer, service, amount, status, at)| {
            let created_at = format!("2025-01-{at}:00");
            booking_row(id, customer, service, amount, status, &created_at)
        })
        .collect();
        let booking_count = bookings.len();
        db.seed("booking", bookings)?;
        let payments = vec![
            payment_row(2, 3, "30.00", "4.50", "Paid"),
            payment_row(1, 2, "20.00", "3.00", "Paid"),
        ];
        let payment_count = payments.len();
        db.seed("earning", payments)?;

        tracing::info!("📣 Seeding support and site content");
        db.seed(
            "complaint",
            [
                complaint_row(2, 4, "Worker arrived late", "Open"),
                complaint_row(1, 2, "Missed a room", "Resolved"),
            ],
        )?;
        db.seed(
            "discount",
            [
                promo_row(2, "EID25", "Active"),
                promo_row(1, "WELCOME10", "Inactive"),
            ],
        )?;
        db.seed(
            "notification",
            [json!({
                "notification_id": 1,
                "title": "Welcome",
                "body": "Book your first clean today",
                "created_at": "2024-12-20 08:00:00",
            })],
        )?;
        db.seed(
            "testimonial",
            [json!({
                "testimonial_id": 1,
                "customer_name": "Hodan Ali",
                "review": "Spotless work, on time.",
                "rating": 5,
                "status": "Active",
            })],
        )?;
        db.seed(
            "member",
            [json!({
                "member_id": 1,
                "name": "Ayaan Hassan",
                "role": "Founder",
                "sort_order": 1,
                "status": "Active",
            })],
        )?;
        db.seed(
            "blog",
            [json!({
                "blog_id": 1,
                "title": "Five cleaning tips",
                "description": "Start from the top.",
                "is_published": 1,
            })],
        )?;
        db.seed(
            "contact",
            [json!({
                "contact_id": 1,
                "name": "Guled",
                "email": "guled@example.com",
                "subject": "Partnership",
                "message": "Can we talk?",
                "is_read": 0,
            })],
        )?;
        db.seed(
            "privacy",
            [json!({
                "privacy_id": 1,
                "heading": "Data we collect",
                "description": "Name, phone and address.",
                "sort_order": 1,
                "status": "Active",
            })],
        )?;
        db.seed(
            "account_delete",
            [json!({
                "request_id": 1,
                "user_id": 3,
                "full_name": "Amina Noor",
                "email": "amina@example.com",
                "reason": "Moving abroad",
            })],
        )?;

        tracing::info!("✅ Demo dataset created");
        Ok(Self {
            categories: category_count,
            customers: customer_count,
            workers: worker_count,
            bookings: booking_count,
            payments: payment_count,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Available demo data:");
        tracing::info!(
            "   🗂️ {} categories (one inactive)",
            self.categories
        );
        tracing::info!(
            "   👥 {} customers, {} workers",
            self.customers,
            self.workers
        );
        tracing::info!(
            "   📅 {} bookings across all statuses, {} payments",
            self.bookings,
            self.payments
        );
        tracing::info!("   📣 Complaints, promo codes and site content");
    }
}
