use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Modest pool: every operation is a single round trip, nothing holds
        // a connection across requests
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .next_back()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("siteboard");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the two listing queries sort on.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // team_members listed oldest-first
        let team_members = self.db.collection::<mongodb::bson::Document>("team_members");

        let team_index = IndexModel::builder()
            .keys(doc! { "created_at": 1 })
            .build();

        match team_members.create_index(team_index).await {
            Ok(_) => log::info!("   ✅ Index created: team_members(created_at)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // snapshots listed newest-first with a fixed cap
        let snapshots = self.db.collection::<mongodb::bson::Document>("snapshots");

        let snapshot_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        match snapshots.create_index(snapshot_index).await {
            Ok(_) => log::info!("   ✅ Index created: snapshots(created_at)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
