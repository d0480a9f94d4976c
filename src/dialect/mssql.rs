// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::dialect::Dialect;

/// A [`Dialect`] for [Microsoft SQL Server](https://www.microsoft.com/en-us/sql-server/).
#[derive(Debug, Default)]
pub struct MsSqlDialect;

impl Dialect for MsSqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    // See https://docs.microsoft.com/en-us/sql/relational-databases/databases/database-identifiers
    fn supports_bracket_quoted_identifier(&self) -> bool {
        true
    }

    fn supports_temp_table_prefix(&self) -> bool {
        true
    }

    fn supports_at_bind_parameter(&self) -> bool {
        true
    }
}
