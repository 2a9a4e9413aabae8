//! Backend rows in the shapes the real backend returns them, for seeding
//! the stub.

use serde_json::{Value, json};

pub fn category_row(id: i64, name: &str, status: &str) -> Value {
    json!({
        "service_id": id,
        "service_name": name,
        "description": format!("{name} services"),
        "status": status,
        "created_at": "2024-12-01 09:00:00",
    })
}

pub fn sub_service_row(
    id: i64,
    service_id: i64,
    name: &str,
    price: &str,
) -> Value {
    json!({
        "sub_service_id": id,
        "service_id": service_id,
        "sub_service_name": name,
        "price": price,
        "status": "Active",
    })
}

pub fn user_row(id: i64, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "full_name": name,
        "email": email,
        "phone_number": "+252 61 000 0000",
        "role": "customer",
        "status": 1,
    })
}

/// The user account and staff profile behind one worker.
pub fn worker_rows(
    staff_id: i64,
    user_id: i64,
    name: &str,
    completed_jobs: i64,
    rating: &str,
) -> (Value, Value) {
    let user = json!({
        "id": user_id,
        "name": name,
        "email": format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', ".")
        ),
        "role": "staff",
    });
    let staff = json!({
        "staff_id": staff_id,
        "staff_user_id": user_id,
        "service_id": 1,
        "service_name": "Cleaning",
        "total_jobs": completed_jobs,
        "avg_rating": rating,
        "is_available": 1,
        "status": "Active",
    });
    (user, staff)
}

pub fn booking_row(
    id: i64,
    customer: &str,
    service: &str,
    amount: &str,
    status: &str,
    created_at: &str,
) -> Value {
    json!({
        "book_id": id,
        "user_name": customer,
        "service_name": service,
        "total_amount": amount,
        "booking_status": status,
        "payment_status": "Unpaid",
        "address": "Hodan District, Mogadishu",
        "created_at": created_at,
    })
}

pub fn payment_row(
    id: i64,
    booking_id: i64,
    amount: &str,
    commission: &str,
    status: &str,
) -> Value {
    json!({
        "earning_id": id,
        "book_id": booking_id,
        "total_amount": amount,
        "admin_commission": commission,
        "payment_status": status,
    })
}

pub fn complaint_row(
    id: i64,
    booking_id: i64,
    issue: &str,
    status: &str,
) -> Value {
    json!({
        "complaint_id": id,
        "book_id": booking_id,
        "issue": issue,
        "status": status,
    })
}

pub fn promo_row(id: i64, code: &str, status: &str) -> Value {
    json!({
        "discount_id": id,
        "promo_code": code,
        "discount_type": "percentage",
        "value": "10",
        "status": status,
    })
}
