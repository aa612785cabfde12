//! `product_store` 命令行
//!
//! `--memory` 每次运行都会得到一张新的空表，因此只接受 `add` 与 `migrate`。

use anyhow::{bail, Context};
use serde_json::{json, Value};

use crate::app::product::{NewProduct, ProductId, ProductService};

pub const MEMORY_FLAG: &str = "--memory";

pub const USAGE: &str = "\
用法: product_store [--memory] <命令> [参数]

可用的命令:
  migrate                   - 创建 products 表
  add <名称> <价格> [ID]    - 新建产品
  get <ID>                  - 查询产品
  list                      - 列出全部产品
  rename <ID> <名称>        - 修改名称
  reprice <ID> <价格>       - 修改价格
  delete <ID>               - 删除产品
  count                     - 统计产品数量

选项:
  --memory                  - 使用内存存储试运行，仅适用于 add 与 migrate

环境变量:
  DATABASE_URL              - 覆盖配置中的数据库地址
  PRODUCT_LOG               - 覆盖日志级别
";

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub in_memory: bool,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Migrate,
    Usage,
    Store(Action),
}

/// 需要打开存储的命令
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(NewProduct),
    Get(ProductId),
    List,
    Rename(ProductId, String),
    Reprice(ProductId, f64),
    Delete(ProductId),
    Count,
}

impl Action {
    fn allowed_in_memory(&self) -> bool {
        matches!(self, Action::Add(_))
    }
}

/// 解析命令行参数（不含程序名）
pub fn parse<I, S>(args: I) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args: Vec<String> = args.into_iter().map(Into::into).collect();
    let before = args.len();
    args.retain(|arg| arg != MEMORY_FLAG);
    let in_memory = args.len() != before;

    let command = match args.as_slice() {
        [cmd] if cmd == "migrate" => Command::Migrate,
        [cmd, name, price] if cmd == "add" => {
            Command::Store(Action::Add(NewProduct::new(name, parse_price(price)?)))
        }
        [cmd, name, price, id] if cmd == "add" => Command::Store(Action::Add(
            NewProduct::new(name, parse_price(price)?).with_id(parse_id(id)?),
        )),
        [cmd, id] if cmd == "get" => Command::Store(Action::Get(parse_id(id)?)),
        [cmd] if cmd == "list" => Command::Store(Action::List),
        [cmd, id, name] if cmd == "rename" => {
            Command::Store(Action::Rename(parse_id(id)?, name.clone()))
        }
        [cmd, id, price] if cmd == "reprice" => {
            Command::Store(Action::Reprice(parse_id(id)?, parse_price(price)?))
        }
        [cmd, id] if cmd == "delete" => Command::Store(Action::Delete(parse_id(id)?)),
        [cmd] if cmd == "count" => Command::Store(Action::Count),
        _ => Command::Usage,
    };

    if let (true, Command::Store(action)) = (in_memory, &command) {
        if !action.allowed_in_memory() {
            bail!(
                "{} 每次运行都是新的空存储，只能用于 add 与 migrate",
                MEMORY_FLAG
            );
        }
    }

    Ok(Invocation { in_memory, command })
}

/// 执行命令，返回要输出的 JSON
pub async fn run(action: Action, service: &ProductService) -> anyhow::Result<Value> {
    let value = match action {
        Action::Add(product) => serde_json::to_value(service.create(product).await?)?,
        Action::Get(id) => serde_json::to_value(service.get(id).await?)?,
        Action::List => serde_json::to_value(service.list().await?)?,
        Action::Rename(id, name) => serde_json::to_value(service.rename(id, name).await?)?,
        Action::Reprice(id, price) => serde_json::to_value(service.reprice(id, price).await?)?,
        Action::Delete(id) => {
            service.remove(id).await?;
            json!({ "deleted": id })
        }
        Action::Count => json!({ "count": service.count().await? }),
    };
    Ok(value)
}

fn parse_price(raw: &str) -> anyhow::Result<f64> {
    raw.parse().with_context(|| format!("无效的价格: {}", raw))
}

fn parse_id(raw: &str) -> anyhow::Result<ProductId> {
    Ok(raw.parse()?)
}
