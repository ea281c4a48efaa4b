use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-travels")]
#[command(about = "写真から旅行先をおすすめするツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// カテゴリ→都市テーブル（JSON）
    #[arg(long, global = true)]
    pub table: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真（またはフォルダ内の写真）を認識しておすすめ都市を表示
    Recognize {
        /// 画像ファイルまたはフォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// カテゴリからおすすめ都市を表示
    Resolve {
        /// カテゴリ名（sea/ocean/beach/mountain/snow ...）
        #[arg(required = true)]
        category: String,
    },

    /// カテゴリ→都市テーブルを表示
    Categories,

    /// 設定を表示/編集
    Config {
        /// トークンを設定
        #[arg(long)]
        set_token: Option<String>,

        /// Vision APIのエンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
