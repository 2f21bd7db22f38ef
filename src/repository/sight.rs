//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 基于 SeaORM 的景点仓储实现。

use super::{Paged, SightFilter, SightForm, SightPage, SightRepository};
use crate::error::{AdminError, Result};
use crate::model::{sight, Sight, SightFlag};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait,
    Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use tracing::{debug, instrument};

const LIKE_ESCAPE: char = '\\';

/// 转义 LIKE 通配符，搜索词按字面匹配
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// SeaORM 景点仓储
#[derive(Clone, Debug)]
pub struct SeaOrmSightRepository {
    db: DatabaseConnection,
}

impl SeaOrmSightRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 底层数据库连接
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 稳定排序：创建时间倒序，主键倒序兜底
    fn ordered(select: Select<sight::Entity>) -> Select<sight::Entity> {
        select
            .order_by_desc(sight::Column::CreatedAt)
            .order_by_desc(sight::Column::Id)
    }

    /// 不区分大小写的包含匹配
    fn icontains(column: sight::Column, pattern: &str) -> SimpleExpr {
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
    }

    fn ensure_page_size(per_page: u64) -> Result<()> {
        if per_page == 0 {
            return Err(AdminError::Configuration(
                "page size cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    fn active_model(form: &SightForm) -> sight::ActiveModel {
        sight::ActiveModel {
            id: NotSet,
            name: Set(form.name.clone()),
            desc: Set(form.desc.clone()),
            main_img: Set(form.main_img.clone()),
            banner_img: Set(form.banner_img.clone()),
            content: Set(form.content.clone()),
            score: Set(form.score),
            min_price: Set(form.min_price),
            province: Set(form.province.clone()),
            city: Set(form.city.clone()),
            area: Set(form.area.clone()),
            town: Set(form.town.clone()),
            is_top: Set(form.is_top),
            is_hot: Set(form.is_hot),
            is_valid: Set(form.is_valid),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

#[async_trait]
impl SightRepository for SeaOrmSightRepository {
    #[instrument(skip(self), level = "debug")]
    async fn first_flagged_page(&self, flag: SightFlag, per_page: u64) -> Result<SightPage> {
        Self::ensure_page_size(per_page)?;

        let select = sight::Entity::find()
            .filter(sight::Column::IsValid.eq(true))
            .filter(flag.is_set());
        let paginator = Self::ordered(select).paginate(&self.db, per_page);

        let counts = paginator.num_items_and_pages().await?;
        if counts.number_of_items == 0 {
            debug!("No valid sights flagged {}", flag);
            return Ok(SightPage::Empty);
        }

        // 计数与取页是两次查询，期间记录可能被删除
        let items = paginator.fetch_page(0).await?;
        Ok(SightPage::first(
            items,
            counts.number_of_items,
            counts.number_of_pages,
        ))
    }

    #[instrument(skip(self, form), level = "debug", fields(name = %form.name))]
    async fn insert(&self, form: &SightForm) -> Result<Sight> {
        let now = Utc::now();
        let mut model = Self::active_model(form);
        model.created_at = Set(now);
        model.updated_at = Set(now);

        let sight = model.insert(&self.db).await?;
        debug!("Inserted sight id={}", sight.id);
        Ok(sight)
    }

    #[instrument(skip(self, form), level = "debug")]
    async fn update(&self, id: i32, form: &SightForm) -> Result<Sight> {
        let mut model = Self::active_model(form);
        model.id = Unchanged(id);
        model.updated_at = Set(Utc::now());

        match model.update(&self.db).await {
            Ok(sight) => Ok(sight),
            Err(DbErr::RecordNotUpdated) => Err(AdminError::NotFound(format!("sight {}", id))),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sight::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self), level = "debug")]
    async fn find(&self, id: i32) -> Result<Option<Sight>> {
        Ok(sight::Entity::find_by_id(id).one(&self.db).await?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn search(
        &self,
        query: Option<&str>,
        filter: SightFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paged<Sight>> {
        Self::ensure_page_size(per_page)?;

        let mut select = sight::Entity::find();
        if let Some(term) = query.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            select = select.filter(
                Condition::any()
                    .add(Self::icontains(sight::Column::Name, &pattern))
                    .add(Self::icontains(sight::Column::Desc, &pattern)),
            );
        }
        if let Some(is_top) = filter.is_top {
            select = select.filter(sight::Column::IsTop.eq(is_top));
        }
        if let Some(is_hot) = filter.is_hot {
            select = select.filter(sight::Column::IsHot.eq(is_hot));
        }

        let current_page = page.max(1);
        let paginator = Self::ordered(select).paginate(&self.db, per_page);
        let counts = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(current_page - 1).await?;

        Ok(Paged {
            items,
            total_count: counts.number_of_items,
            page_count: counts.number_of_pages,
            current_page,
        })
    }

    #[instrument(skip(self), level = "debug")]
    async fn set_valid(&self, ids: &[i32], valid: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sight::Entity::update_many()
            .col_expr(sight::Column::IsValid, Expr::value(valid))
            .col_expr(sight::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(sight::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
