use std::sync::Arc;

use admin_csv_exports::{
    install_csv_exports, AdminSite, AuthContext, BasicModelAdmin, ExportConfig, FieldDescriptor,
    ModelMeta, Record,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("📤 CSV Export Demo");
    println!("==================");

    let config = ExportConfig {
        require_permission: true,
        ..ExportConfig::default()
    };

    let mut site = AdminSite::new();
    let key = site.register(Arc::new(BasicModelAdmin::new(ModelMeta::new(
        "crm",
        "Contact",
        vec![
            FieldDescriptor::new("id"),
            FieldDescriptor::new("name"),
            FieldDescriptor::new("email"),
            FieldDescriptor::new("created_at"),
        ],
    ))));
    install_csv_exports(&mut site, &config);

    let now = Utc::now().to_rfc3339();
    let records = vec![
        json!({"id": 1, "name": "Ann", "email": "a@x.com", "created_at": now}),
        json!({"id": 2, "name": "Bob, Jr.", "email": "b@x.com", "created_at": now}),
    ];

    let stranger = AuthContext::new(Uuid::new_v4());
    let actions = site.available_actions(&key, &config, &stranger);
    println!(
        "1️⃣ Actions visible without the permission: {}",
        actions.len()
    );

    let exporter = AuthContext::new(Uuid::new_v4()).with_perm("crm.csv_contact");
    let actions = site.available_actions(&key, &config, &exporter);
    println!("2️⃣ Actions visible with the permission: {}", actions.len());

    let admin = site.admin(&key).unwrap().clone();
    let mut iter = records.iter().map(|r| r as &dyn Record);
    let resp = actions[0].run(&config, &exporter, admin.as_ref(), &mut iter)?;

    println!("3️⃣ Response:");
    println!("   Status: {}", resp.status.as_u16());
    println!("   Content-Type: {}", resp.content_type);
    println!(
        "   Content-Disposition: {}",
        resp.content_disposition.as_deref().unwrap_or("-")
    );
    println!("   Body:");
    for line in resp.body_text().lines() {
        println!("   | {}", line);
    }

    println!("\n✅ DEMO COMPLETED");
    Ok(())
}
