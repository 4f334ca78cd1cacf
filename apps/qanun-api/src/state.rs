use std::sync::Arc;

use qanun_service::QanunService;
use qanun_storage::{db::Db, slices::PgSliceStore, vector::PgVectorIndex};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<QanunService>,
}
impl AppState {
	pub async fn new(config: qanun_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage).await?;

		db.ensure_schema(config.retrieval.embed_dim).await?;

		let store = Arc::new(PgSliceStore::new(db.pool.clone(), config.retrieval.embed_dim));
		let index = Arc::new(PgVectorIndex::new(db.pool.clone()));
		let service = QanunService::new(config, store, index);

		Ok(Self { service: Arc::new(service) })
	}
}
