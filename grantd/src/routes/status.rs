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

use grant::actix_web::{Error, HttpResponse};
use grant::futures::{Future, IntoFuture};

#[derive(Debug, Serialize, Deserialize)]
struct Status {
    display_name: String,
    endpoint: String,
    version: String,
}

pub fn get_status(
    display_name: String,
    endpoint: String,
) -> Box<dyn Future<Item = HttpResponse, Error = Error>> {
    let status = Status {
        display_name,
        endpoint,
        version: get_version(),
    };

    Box::new(HttpResponse::Ok().json(status).into_future())
}

fn get_version() -> String {
    format!(
        "{}.{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH")
    )
}
