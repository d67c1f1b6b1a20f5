use std::convert::Infallible;

use rocket::request::{FromRequest, Outcome, Request};

/// List paging pulled from `page`/`len` (or `p`/`l`) query parameters.
/// Absent parameters fall back to the first page of 20.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PageState {
    pub page_length: u32,
    pub page: u32,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            page_length: 20,
            page: 0,
        }
    }
}

impl PageState {
    pub fn skip(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_length)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_length)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for PageState {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let length: Option<u32> = request
            .query_value("len")
            .map(|it| it.ok())
            .flatten()
            .or_else(|| request.query_value("l").map(|it| it.ok()).flatten());

        let page: Option<u32> = request
            .query_value("page")
            .map(|it| it.ok())
            .flatten()
            .or_else(|| request.query_value("p").map(|it| it.ok()).flatten());

        if let Some(p) = page {
            Outcome::Success(PageState {
                page_length: length.unwrap_or(20),
                page: p,
            })
        } else {
            Outcome::Success(Default::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_first_twenty() {
        let page = PageState::default();
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn skip_multiplies_page_by_length() {
        let page = PageState {
            page_length: 50,
            page: 3,
        };
        assert_eq!(page.skip(), 150);
        assert_eq!(page.limit(), 50);
    }
}
