//! 商品目录命令行客户端
//!
//! 与网页端相同的流程：拉取列表、通过表单新建/编辑、确认后删除。

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use goods_catalog::{
    app::goods::Good,
    client::{CatalogApi, GoodsPage, HttpCatalogClient, ImageFile, DEFAULT_BASE_URL},
    core::ItemId,
    infrastructure::{logger::Logger, uploads::ImageKind},
};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(name = "goods_client", about = "商品目录客户端")]
struct Cli {
    /// 服务端地址
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// 日志级别
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出所有商品
    List,
    /// 查看单个商品
    Show { id: u64 },
    /// 新建商品
    Create(FormArgs),
    /// 编辑商品，只修改给出的字段
    Edit {
        id: u64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// 删除商品
    Delete {
        id: u64,
        /// 跳过确认
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    /// 图片文件路径，给出时以 multipart 提交
    #[arg(long)]
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    Logger::init(&cli.log_level);

    let mut page = GoodsPage::new(HttpCatalogClient::with_base_url(&cli.base_url));

    match cli.command {
        Command::List => {
            page.load().await.context("无法加载商品列表")?;
            print_table(page.goods());
        }
        Command::Show { id } => {
            let good = page.api().get_good(ItemId(id)).await?;
            println!("{}", serde_json::to_string_pretty(&good)?);
        }
        Command::Create(args) => {
            page.open_create();
            fill_form(&mut page, args)?;
            if let Some(good) = page.submit().await? {
                println!("✅ 已创建商品 {}", good.id);
                print_table(&[good]);
            }
        }
        Command::Edit { id, form } => {
            page.load().await.context("无法加载商品列表")?;
            if !page.open_edit(ItemId(id)) {
                bail!("商品 {} 不存在", id);
            }
            fill_form(&mut page, form)?;
            if let Some(good) = page.submit().await? {
                println!("✅ 已更新商品 {}", good.id);
                print_table(&[good]);
            }
        }
        Command::Delete { id, yes } => {
            page.load().await.context("无法加载商品列表")?;
            if !page.goods().iter().any(|g| g.id == ItemId(id)) {
                bail!("商品 {} 不存在", id);
            }
            let deleted = page.delete(ItemId(id), |good| yes || confirm(good)).await?;
            if deleted {
                println!("🗑  已删除商品 {}", id);
            } else {
                println!("已取消");
            }
        }
    }

    Ok(())
}

fn fill_form<A: CatalogApi>(page: &mut GoodsPage<A>, args: FormArgs) -> anyhow::Result<()> {
    let image = args.image.as_deref().map(read_image).transpose()?;
    let Some(form) = page.form_mut() else {
        bail!("表单未打开");
    };

    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(price) = args.price {
        form.price = price;
    }
    if let Some(stock) = args.stock {
        form.stock = stock;
    }
    if let Some(image) = image {
        form.choose_image(image);
    }
    Ok(())
}

fn read_image(path: &Path) -> anyhow::Result<ImageFile> {
    let bytes = std::fs::read(path).with_context(|| format!("无法读取 {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let content_type = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageKind::from_extension)
        .map(|kind| kind.mime())
        .unwrap_or("application/octet-stream")
        .to_string();
    Ok(ImageFile {
        file_name,
        content_type,
        bytes,
    })
}

fn confirm(good: &Good) -> bool {
    print!("删除商品 \"{}\" ({})? [y/N] ", good.name, good.id);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_table(goods: &[Good]) {
    if goods.is_empty() {
        println!("暂无商品");
        return;
    }
    println!(
        "{:<15} {:<20} {:<12} {:>10} {:>6}  {}",
        "ID", "名称", "分类", "价格", "库存", "图片"
    );
    for good in goods {
        println!(
            "{:<15} {:<20} {:<12} {:>10.2} {:>6}  {}",
            good.id.to_string(),
            good.name,
            good.category,
            good.price,
            good.stock,
            good.image.as_deref().unwrap_or("-")
        );
    }
}
