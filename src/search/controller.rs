use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use log::warn;
use serde::Serialize;

use crate::database::BlogStore;
use crate::forms::{BoundForm, FieldErrors, SearchForm, validate_search};
use crate::post::controller::post_views;
use crate::post::model::PostView;
use crate::utils::error::CustomError;
use crate::utils::helpers::render_page;

#[derive(Serialize)]
struct SearchPage {
    form: BoundForm<SearchForm>,
    query: Option<String>,
    results: Vec<PostView>,
}

/// GET /search/?q=...
pub async fn post_search(
    store: web::Data<dyn BlogStore>,
    query: web::Query<SearchForm>,
) -> Result<HttpResponse, CustomError> {
    let form = query.into_inner();

    if form.q.is_none() {
        return Ok(render_page(
            StatusCode::OK,
            "Search form",
            SearchPage {
                form: BoundForm::unbound(),
                query: None,
                results: Vec::new(),
            },
        ));
    }

    match validate_search(&form) {
        Ok(data) => {
            let posts = store.search_posts(&data.query).await?;
            let results = post_views(store.get_ref(), &posts).await?;

            Ok(render_page(
                StatusCode::OK,
                "Search completed successfully",
                SearchPage {
                    form: BoundForm::bound(form, FieldErrors::new()),
                    query: Some(data.query),
                    results,
                },
            ))
        }
        Err(errors) => {
            warn!("Rejected search query: {:?}", errors);

            Ok(render_page(
                StatusCode::BAD_REQUEST,
                "Search form is invalid",
                SearchPage {
                    form: BoundForm::bound(form, errors),
                    query: None,
                    results: Vec::new(),
                },
            ))
        }
    }
}
