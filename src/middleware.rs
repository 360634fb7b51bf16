use std::io::Read;

use iron::headers::ContentType;
use iron::method::Method;
use iron::modifiers::Header;
use iron::mime::{Mime, SubLevel, TopLevel};
use iron::prelude::*;
use iron::typemap::Key;
use iron::{status, AfterMiddleware, BeforeMiddleware};
use log::debug;
use router::NoRoute;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::views::{self, NotFoundPage};

/// Raw URL-encoded request body, read once by `FormBodyParser`.
pub struct FormBody;

impl Key for FormBody {
    type Value = String;
}

/// Decode the form body stored by `FormBodyParser`.
/// A request without a body decodes like an empty form.
pub fn decode_form<T: DeserializeOwned>(req: &Request) -> Result<T, serde_urlencoded::de::Error> {
    let body = req.extensions.get::<FormBody>().map(|body| body.as_str()).unwrap_or("");
    serde_urlencoded::from_str(body)
}

fn carries_form(req: &Request) -> bool {
    let has_body = match req.method {
        Method::Post | Method::Put | Method::Patch | Method::Delete => true,
        _ => false,
    };
    if !has_body {
        return false;
    }
    match req.headers.get::<ContentType>() {
        Some(&ContentType(Mime(TopLevel::Application, SubLevel::WwwFormUrlEncoded, _))) => true,
        Some(_) => false,
        None => true,
    }
}

pub struct FormBodyParser;

impl BeforeMiddleware for FormBodyParser {
    fn before(&self, req: &mut Request) -> IronResult<()> {
        if !carries_form(req) {
            return Ok(());
        }

        let mut body = String::new();
        req.body
            .read_to_string(&mut body)
            .map_err(|e| {
                let message = e.to_string();
                IronError::new(e, (status::BadRequest, Header(ContentType::plaintext()), message))
            })?;
        req.extensions.insert::<FormBody>(body);
        Ok(())
    }
}

#[derive(Deserialize)]
struct OverrideField {
    #[serde(rename = "_method")]
    method: Option<String>,
}

fn override_target(value: &str) -> Option<Method> {
    match value.trim().to_uppercase().as_str() {
        "PUT" => Some(Method::Put),
        "PATCH" => Some(Method::Patch),
        "DELETE" => Some(Method::Delete),
        _ => None,
    }
}

/// Lets HTML forms send PUT, PATCH and DELETE as a POST carrying `_method`,
/// either in the query string or in the form body. The query wins.
/// Must run after `FormBodyParser`.
pub struct MethodOverride;

impl BeforeMiddleware for MethodOverride {
    fn before(&self, req: &mut Request) -> IronResult<()> {
        if req.method != Method::Post {
            return Ok(());
        }

        let from_query = req
            .url
            .query()
            .and_then(|query| serde_urlencoded::from_str::<OverrideField>(query).ok())
            .and_then(|field| field.method);
        let requested = match from_query {
            Some(method) => Some(method),
            None => decode_form::<OverrideField>(req).ok().and_then(|field| field.method),
        };

        if let Some(method) = requested.as_ref().and_then(|value| override_target(value)) {
            debug!("overriding POST {} with {}", req.url, method);
            req.method = method;
        }
        Ok(())
    }
}

pub struct HtmlAfterMiddleware;

impl AfterMiddleware for HtmlAfterMiddleware {
    fn after(&self, _: &mut Request, mut res: Response) -> IronResult<Response> {
        if !res.headers.has::<ContentType>() {
            res.headers.set(ContentType::html());
        }
        Ok(res)
    }
}

/// Turns the router's `NoRoute` error into the rendered not-found page.
pub struct NotFoundCatcher;

impl AfterMiddleware for NotFoundCatcher {
    fn catch(&self, req: &mut Request, err: IronError) -> IronResult<Response> {
        if err.error.is::<NoRoute>() {
            let page = NotFoundPage {
                message: format!("There is no page at /{}.", req.url.path().join("/")),
            };
            Ok(views::render(&page, status::NotFound))
        } else {
            Err(err)
        }
    }
}
