// Copyright (c) 2019 Target Brands, Inc.
// Copyright 2018-2020 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub const DEFAULT_LIMIT: usize = 100;
pub const DEFAULT_OFFSET: usize = 0;

/// Paging links included with every list response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Paging {
    pub current: String,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub first: String,
    pub prev: String,
    pub next: String,
    pub last: String,
}

/// The paging values accepted by list endpoints as query parameters.
#[derive(Debug, Deserialize)]
pub struct PagingQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_offset")]
    pub offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_offset() -> usize {
    DEFAULT_OFFSET
}

/// Builds the paging links for a list response.
///
/// # Arguments
///
/// * `limit` - The limit value used for the request, if one was provided
/// * `offset` - The offset value used for the request, if one was provided
/// * `link` - The base link for the paged resource, ending in `?`
/// * `query_count` - The total number of records the query matched
pub fn get_response_paging_info(
    limit: Option<usize>,
    offset: Option<usize>,
    link: &str,
    query_count: usize,
) -> Paging {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let offset = offset.unwrap_or(DEFAULT_OFFSET);

    let base_link = format!("{}limit={}&", link, limit);

    let current_link = format!("{}offset={}", base_link, offset);

    let first_link = format!("{}offset=0", base_link);

    let previous_offset = if offset > limit { offset - limit } else { 0 };
    let previous_link = format!("{}offset={}", base_link, previous_offset);

    let next_offset = if offset + limit > query_count {
        offset
    } else {
        offset + limit
    };
    let next_link = format!("{}offset={}", base_link, next_offset);

    let last_offset = if query_count > 0 {
        ((query_count - 1) / limit) * limit
    } else {
        0
    };
    let last_link = format!("{}offset={}", base_link, last_offset);

    Paging {
        current: current_link,
        offset,
        limit,
        total: query_count,
        first: first_link,
        prev: previous_link,
        next: next_link,
        last: last_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the paging links for a first page that covers the full result
    /// set.
    #[test]
    fn single_page() {
        let paging = get_response_paging_info(None, None, "/permissions?", 2);
        assert_eq!(paging.current, "/permissions?limit=100&offset=0");
        assert_eq!(paging.next, "/permissions?limit=100&offset=0");
        assert_eq!(paging.last, "/permissions?limit=100&offset=0");
        assert_eq!(paging.total, 2);
    }

    /// Verify the paging links when the result set spans multiple pages.
    #[test]
    fn multiple_pages() {
        let paging = get_response_paging_info(Some(100), Some(0), "/permissions?", 101);
        assert_eq!(paging.next, "/permissions?limit=100&offset=100");
        assert_eq!(paging.last, "/permissions?limit=100&offset=100");

        let paging = get_response_paging_info(Some(100), Some(100), "/permissions?", 101);
        assert_eq!(paging.current, "/permissions?limit=100&offset=100");
        assert_eq!(paging.prev, "/permissions?limit=100&offset=0");
        assert_eq!(paging.next, "/permissions?limit=100&offset=100");
    }
}
