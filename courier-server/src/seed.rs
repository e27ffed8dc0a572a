//! Demo data for local exploration (`--seed-demo`).

use courier_core::{Audience, Notification, StoreHandle, Target, Template};
use tracing::info;

pub fn seed_demo(stores: &StoreHandle) {
    let alice = Target::new("Alice", "+15551234567");
    let bob = Target::new("Bob", "+15557654321");
    let welcome = Template::new("welcome", "Hello {name}, welcome aboard!");
    let oncall = Audience::new("oncall")
        .with_members(vec![alice.uuid.clone(), bob.uuid.clone()]);
    let notification = Notification::new(oncall.uuid.clone(), welcome.uuid.clone());

    stores.targets.upsert(alice);
    stores.targets.upsert(bob);
    stores.templates.upsert(welcome);
    stores.audiences.upsert(oncall);
    stores.notifications.upsert(notification);
    info!("seeded demo data set");
}
