//! HTTP surface of the editing protocol
//!
//! All routes live under [`EditingSettings::route_prefix`]:
//!
//! | Method | Path | Answer |
//! |---|---|---|
//! | GET | `/edit/{module}` | edit modal |
//! | POST | `/modules/{module}/update` | mutation |
//! | DELETE | `/modules/{module}/delete` | mutation |
//! | GET, POST | `/add-child/{module}` | form modal, mutation |
//! | GET | `/edit-child/{module}/{child}` | form modal |
//! | POST | `/save-child/{module}/{child}` | mutation |
//! | DELETE | `/delete-child/{module}/{child}` | mutation |
//! | GET | `/pending` | pending edits modal |
//! | POST | `/pending/{edit}/approve` | mutation |
//! | POST | `/pending/{edit}/reject` | mutation |
//!
//! Path segments are percent-decoded and then validated as DOM ids; a
//! segment that fails is answered with `400` before any handler runs.

use std::str::FromStr;

use http::header::{ALLOW, CONTENT_TYPE, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use simplypages_components::EditMode;
use simplypages_conf::EditingSettings;
use simplypages_core::{DomId, Node};
use uuid::Uuid;

use crate::editable::Fields;
use crate::error::{EditError, Result};
use crate::handler::{ChildEditHandler, EditHandler, EditRequest, StoreEditHandler};
use crate::oob::{OobResponse, RefreshRegion};
use crate::outcome::EditOutcome;
use crate::store::{ModuleStore, PageRenderer};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
	Edit(DomId),
	UpdateModule(DomId),
	DeleteModule(DomId),
	AddChild(DomId),
	EditChild(DomId, DomId),
	SaveChild(DomId, DomId),
	DeleteChild(DomId, DomId),
	Pending,
	Approve(Uuid),
	Reject(Uuid),
}

/// Which container a mutation response refreshes.
#[derive(Debug, Clone, Copy)]
enum Refresh {
	Page,
	Container,
}

impl Route {
	/// `Ok(None)` for paths that name no route.
	fn parse(path: &str) -> Result<Option<Route>> {
		let trimmed = path.trim_start_matches('/').trim_end_matches('/');
		let segments = trimmed
			.split('/')
			.map(|segment| {
				urlencoding::decode(segment)
					.map(|s| s.into_owned())
					.map_err(|err| EditError::BadRequest(err.to_string()))
			})
			.collect::<Result<Vec<String>>>()?;
		let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

		let route = match segments.as_slice() {
			["edit", module] => Route::Edit(DomId::new(*module)?),
			["modules", module, "update"] => Route::UpdateModule(DomId::new(*module)?),
			["modules", module, "delete"] => Route::DeleteModule(DomId::new(*module)?),
			["add-child", module] => Route::AddChild(DomId::new(*module)?),
			["edit-child", module, child] => {
				Route::EditChild(DomId::new(*module)?, DomId::new(*child)?)
			}
			["save-child", module, child] => {
				Route::SaveChild(DomId::new(*module)?, DomId::new(*child)?)
			}
			["delete-child", module, child] => {
				Route::DeleteChild(DomId::new(*module)?, DomId::new(*child)?)
			}
			["pending"] => Route::Pending,
			["pending", edit, "approve"] => Route::Approve(parse_edit_id(edit)?),
			["pending", edit, "reject"] => Route::Reject(parse_edit_id(edit)?),
			_ => return Ok(None),
		};
		Ok(Some(route))
	}

	fn allow(&self) -> &'static str {
		match self {
			Route::Edit(_) | Route::EditChild(..) | Route::Pending => "GET",
			Route::AddChild(_) => "GET, POST",
			Route::UpdateModule(_) | Route::SaveChild(..) | Route::Approve(_) | Route::Reject(_) => {
				"POST"
			}
			Route::DeleteModule(_) | Route::DeleteChild(..) => "DELETE",
		}
	}

	fn allows(&self, method: &Method) -> bool {
		self.allow().split(", ").any(|m| m == method.as_str())
	}

	/// The module whose defaults apply to the request.
	fn module(&self) -> Option<&DomId> {
		match self {
			Route::Edit(id)
			| Route::UpdateModule(id)
			| Route::DeleteModule(id)
			| Route::AddChild(id)
			| Route::EditChild(id, _)
			| Route::SaveChild(id, _)
			| Route::DeleteChild(id, _) => Some(id),
			Route::Pending | Route::Approve(_) | Route::Reject(_) => None,
		}
	}
}

fn parse_edit_id(raw: &str) -> Result<Uuid> {
	Uuid::parse_str(raw).map_err(|err| EditError::BadRequest(format!("edit id {raw}: {err}")))
}

fn parse_form(raw: &str) -> Result<Fields> {
	serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
		.map(|pairs| pairs.into_iter().collect())
		.map_err(|err| EditError::BadRequest(err.to_string()))
}

fn html_response(status: StatusCode, body: String) -> Response<String> {
	let mut response = Response::new(body);
	*response.status_mut() = status;
	response.headers_mut().insert(
		CONTENT_TYPE,
		HeaderValue::from_static("text/html; charset=utf-8"),
	);
	response
}

/// Serves the editing routes from a [`StoreEditHandler`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use http::{Request, StatusCode};
/// use simplypages_components::ContentModule;
/// use simplypages_conf::EditingSettings;
/// use simplypages_editing::{EditingEndpoints, InMemoryModuleStore};
///
/// let store = InMemoryModuleStore::new()
/// 	.with_module(ContentModule::new("module-1").unwrap().with_content("Hello"));
/// let endpoints = EditingEndpoints::new(Arc::new(store), EditingSettings::default()).unwrap();
///
/// let request = Request::get("/edit/module-1").body(String::new()).unwrap();
/// let response = endpoints.handle(&request);
/// assert_eq!(response.status(), StatusCode::OK);
/// assert!(response.body().contains("Save Changes"));
/// ```
pub struct EditingEndpoints<S> {
	handler: StoreEditHandler<S>,
}

impl<S: ModuleStore> EditingEndpoints<S> {
	pub fn new(store: std::sync::Arc<S>, settings: EditingSettings) -> Result<Self> {
		Ok(Self::from_handler(StoreEditHandler::new(store, settings)?))
	}

	pub fn from_handler(handler: StoreEditHandler<S>) -> Self {
		Self { handler }
	}

	pub fn with_authorizer(
		mut self,
		auth: std::sync::Arc<dyn crate::auth::AuthorizationChecker>,
	) -> Self {
		self.handler = self.handler.with_authorizer(auth);
		self
	}

	pub fn handler(&self) -> &StoreEditHandler<S> {
		&self.handler
	}

	fn settings(&self) -> &EditingSettings {
		self.handler.settings()
	}

	/// Answers one request. Faults become plain-text error responses.
	#[tracing::instrument(
		skip_all,
		fields(method = %request.method(), path = %request.uri().path())
	)]
	pub fn handle(&self, request: &Request<String>) -> Response<String> {
		match self.dispatch(request) {
			Ok(response) => {
				tracing::debug!(status = %response.status(), "handled");
				response
			}
			Err(err) => {
				tracing::warn!(error = %err, "request failed");
				err.into()
			}
		}
	}

	fn strip_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
		let prefix = self.settings().route_prefix.trim_end_matches('/');
		if prefix.is_empty() {
			return Some(path);
		}
		let rest = path.strip_prefix(prefix)?;
		(rest.is_empty() || rest.starts_with('/')).then_some(rest)
	}

	fn dispatch(&self, request: &Request<String>) -> Result<Response<String>> {
		let Some(rest) = self.strip_prefix(request.uri().path()) else {
			return Ok(html_response(StatusCode::NOT_FOUND, "Not Found".to_string()));
		};
		let Some(route) = Route::parse(rest)? else {
			return Ok(html_response(StatusCode::NOT_FOUND, "Not Found".to_string()));
		};
		if !route.allows(request.method()) {
			let mut response =
				html_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string());
			response
				.headers_mut()
				.insert(ALLOW, HeaderValue::from_static(route.allow()));
			return Ok(response);
		}

		let query = parse_form(request.uri().query().unwrap_or_default())?;
		let body = parse_form(request.body())?;
		let edit_request = self.edit_request(&route, &query, &body)?;
		let method = request.method();

		let handler = &self.handler;
		match route {
			Route::Edit(id) => self.modal(handler.render_edit_form(&id, &edit_request)),
			Route::UpdateModule(id) => self.mutation(
				handler.handle_update(&id, &body, &edit_request),
				Refresh::Container,
			),
			Route::DeleteModule(id) => self.mutation(
				handler.handle_delete(&id, &edit_request),
				Refresh::Container,
			),
			Route::AddChild(id) if *method == Method::GET => {
				self.modal(handler.render_add_child_form(&id, &edit_request))
			}
			Route::AddChild(id) => self.mutation(
				handler.handle_add_child(&id, &body, &edit_request),
				Refresh::Page,
			),
			Route::EditChild(parent, child) => {
				self.modal(handler.render_edit_child_form(&parent, &child, &edit_request))
			}
			Route::SaveChild(parent, child) => self.mutation(
				handler.handle_update_child(&parent, &child, &body, &edit_request),
				Refresh::Page,
			),
			Route::DeleteChild(parent, child) => self.mutation(
				handler.handle_delete_child(&parent, &child, &edit_request),
				Refresh::Page,
			),
			Route::Pending => self.modal(handler.render_pending(&edit_request)),
			Route::Approve(edit) => {
				self.mutation(handler.approve(&edit, &edit_request), Refresh::Page)
			}
			Route::Reject(edit) => {
				self.mutation(handler.reject(&edit, &edit_request), Refresh::Page)
			}
		}
	}

	/// Control fields come from the body first, then the query string.
	fn edit_request(&self, route: &Route, query: &Fields, body: &Fields) -> Result<EditRequest> {
		let control = |name: &str| body.get(name).or_else(|| query.get(name)).cloned();
		let user = control("user").filter(|u| !u.is_empty());
		let explicit = control("editMode")
			.map(|raw| EditMode::from_str(&raw))
			.transpose()
			.map_err(|_| EditError::BadRequest("editMode must be owner or user".to_string()))?;
		let mode = match route.module() {
			Some(module) => self.handler.resolve_mode(module, explicit, user.as_deref()),
			None => explicit.unwrap_or_default(),
		};
		Ok(EditRequest::new(user, mode))
	}

	fn modal(&self, node: Result<Node>) -> Result<Response<String>> {
		Ok(html_response(StatusCode::OK, node?.render_to_string()))
	}

	fn mutation(&self, outcome: Result<EditOutcome>, refresh: Refresh) -> Result<Response<String>> {
		let settings = self.settings();
		let notice = match outcome? {
			EditOutcome::Rejected(modal) => {
				let response = OobResponse::notice(settings, modal)?;
				return Ok(html_response(StatusCode::OK, response.render()?));
			}
			EditOutcome::PendingApproval { notice, .. } => Some(notice),
			EditOutcome::Applied(_) => None,
		};
		let renderer = PageRenderer::new(settings);
		let store = self.handler.store();
		let region: RefreshRegion = match refresh {
			Refresh::Page => renderer.page_region(store)?,
			Refresh::Container => renderer.container_region(store)?,
		};
		let mut response = OobResponse::mutation(settings, region)?;
		if let Some(notice) = notice {
			response = response.with_primary(notice);
		}
		tracing::debug!(fragments = response.fragment_count(), "mutation answered");
		Ok(html_response(StatusCode::OK, response.render()?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/edit/module-1", Some(Route::Edit(DomId::new("module-1").unwrap())))]
	#[case("/modules/module-1/update/", Some(Route::UpdateModule(DomId::new("module-1").unwrap())))]
	#[case(
		"/delete-child/module-9/item-0",
		Some(Route::DeleteChild(DomId::new("module-9").unwrap(), DomId::new("item-0").unwrap()))
	)]
	#[case("/pending", Some(Route::Pending))]
	#[case("/unknown/module-1", None)]
	#[case("/edit", None)]
	fn test_route_parse(#[case] path: &str, #[case] expected: Option<Route>) {
		assert_eq!(Route::parse(path).unwrap(), expected);
	}

	#[test]
	fn test_encoded_segment_is_decoded_then_validated() {
		let result = Route::parse("/edit/x%27).remove();alert(%27xss%27);%2F%2F");
		assert!(matches!(result, Err(EditError::Validation(_))));
	}

	#[test]
	fn test_bad_edit_id() {
		assert!(matches!(
			Route::parse("/pending/not-a-uuid/approve"),
			Err(EditError::BadRequest(_))
		));
	}

	#[test]
	fn test_allow() {
		let route = Route::AddChild(DomId::new("module-9").unwrap());
		assert!(route.allows(&Method::GET));
		assert!(route.allows(&Method::POST));
		assert!(!route.allows(&Method::DELETE));
	}

	#[test]
	fn test_parse_form() {
		let fields = parse_form("title=Public+Content&content=a%26b&useMarkdown=true").unwrap();
		assert_eq!(fields.get("title").map(String::as_str), Some("Public Content"));
		assert_eq!(fields.get("content").map(String::as_str), Some("a&b"));
		assert!(parse_form("").unwrap().is_empty());
	}
}
