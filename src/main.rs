use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use multitool::{
    codec,
    config::{
        Config, create_config_file, delete_config_file, get_default_config_path, load_config,
        render_config,
    },
    hashing, json, keypair,
    keypair::RsaKeySize,
    password::{self, BatchPolicy, ClassSet, SystemEntropy},
};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
    time::{Duration, Instant},
};

/// Base64・bcrypt・JSON・パスワード生成・RSAをまとめた開発者向けツール
#[derive(Parser)]
#[command(name = "multitool", version, about)]
struct Cli {
    /// 詳細出力
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 設定ファイルのパス（省略時はデフォルトの場所）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Base64エンコード/デコード
    #[command(subcommand)]
    Base64(Base64Command),
    /// bcryptハッシュの生成と照合
    #[command(subcommand)]
    Bcrypt(BcryptCommand),
    /// JSONの整形・1行化・修復
    #[command(subcommand)]
    Json(JsonCommand),
    /// パスワード・キー生成
    #[command(subcommand)]
    Password(PasswordCommand),
    /// RSAキーペア生成と暗号化テスト
    #[command(subcommand)]
    Rsa(RsaCommand),
    /// 設定ファイルの管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
struct TextInput {
    /// 入力テキスト（省略時は標準入力から読む）
    text: Option<String>,
}

#[derive(Subcommand)]
enum Base64Command {
    Encode(TextInput),
    Decode(TextInput),
}

#[derive(Subcommand)]
enum BcryptCommand {
    /// ハッシュを生成
    Hash {
        #[command(flatten)]
        input: TextInput,
        /// コスト（省略時は設定値）
        #[arg(long)]
        cost: Option<u32>,
    },
    /// ハッシュと平文を照合（不一致なら終了コード1）
    Verify {
        #[arg(long)]
        hash: String,
        #[command(flatten)]
        input: TextInput,
    },
}

#[derive(Subcommand)]
enum JsonCommand {
    Beautify(TextInput),
    Minify(TextInput),
    Repair {
        #[command(flatten)]
        input: TextInput,
        /// 整形して出力
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Subcommand)]
enum PasswordCommand {
    /// 強度名の一覧
    List,
    /// 強度プリセットで生成（省略時は全強度）
    Generate {
        /// 強度名または内部ID
        #[arg(short, long)]
        strength: Option<String>,
        /// 生成件数（省略時は設定値）
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// 生成失敗をスキップせずエラーにする
        #[arg(long)]
        strict: bool,
    },
    /// 長さと文字種を指定して生成
    Custom {
        #[arg(short, long)]
        length: usize,
        #[arg(long)]
        lower: bool,
        #[arg(long)]
        upper: bool,
        #[arg(long)]
        digits: bool,
        #[arg(long)]
        special: bool,
        #[arg(long)]
        hex: bool,
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum RsaCommand {
    /// キーペアを生成
    Generate {
        /// キー長（512, 1024, 2048, 4096）
        #[arg(short, long)]
        bits: Option<u32>,
        /// private.pem / public.pem の出力先（省略時は標準出力）
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// 公開鍵で暗号化（Base64出力）
    Encrypt {
        #[arg(long)]
        public_key: PathBuf,
        #[command(flatten)]
        input: TextInput,
    },
    /// 秘密鍵で復号
    Decrypt {
        #[arg(long)]
        private_key: PathBuf,
        #[command(flatten)]
        input: TextInput,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// デフォルト設定でファイルを作成
    Init {
        /// 既存ファイルを上書き
        #[arg(long)]
        force: bool,
    },
    /// 現在の設定を表示
    Show,
    /// 設定ファイルのパスを表示
    Path,
    /// 設定ファイルを削除
    Delete,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let path = cli.config.as_deref();

    match cli.command {
        Command::Base64(cmd) => {
            load(path)?;
            run_base64(cmd)
        }
        Command::Bcrypt(cmd) => run_bcrypt(cmd, &load(path)?),
        Command::Json(cmd) => run_json(cmd, &load(path)?),
        Command::Password(cmd) => run_password(cmd, &load(path)?),
        Command::Rsa(cmd) => run_rsa(cmd, &load(path)?),
        // 設定ファイルが壊れていても作り直し・削除はできるようにする
        Command::Config(cmd) => run_config(cmd, path),
    }
}

/// 設定の読み込みより前に初期化し、load_configのログも出す
fn init_logger(verbose: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Warn);
    }
}

fn load(path: Option<&Path>) -> Result<Config> {
    let config = load_config(path)?;
    if config.default_verbose {
        log::set_max_level(LevelFilter::Debug);
    }
    Ok(config)
}

/// 引数がなければ標準入力を読む（末尾の改行は除く）
fn read_input(input: TextInput) -> Result<String> {
    if let Some(text) = input.text {
        return Ok(text);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("標準入力の読み込みに失敗")?;
    let trimmed = buffer.trim_end_matches(['\r', '\n']).len();
    buffer.truncate(trimmed);
    Ok(buffer)
}

fn read_pem(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("鍵ファイルの読み込みに失敗: {}", path.display()))
}

fn run_base64(cmd: Base64Command) -> Result<ExitCode> {
    match cmd {
        Base64Command::Encode(input) => {
            let text = read_input(input)?;
            println!("{}", codec::base64_encode(text.as_bytes()));
        }
        Base64Command::Decode(input) => {
            let text = read_input(input)?;
            let decoded = codec::decode_to_string(&text).context("デコードに失敗しました")?;
            println!("{decoded}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_bcrypt(cmd: BcryptCommand, config: &Config) -> Result<ExitCode> {
    match cmd {
        BcryptCommand::Hash { input, cost } => {
            let password = read_input(input)?;
            let cost = cost.unwrap_or(config.bcrypt.cost);
            let hash =
                hashing::hash_password(&password, cost).context("ハッシュ生成に失敗しました")?;
            println!("{hash}");
            Ok(ExitCode::SUCCESS)
        }
        BcryptCommand::Verify { hash, input } => {
            let password = read_input(input)?;
            if hashing::verify_password(&password, &hash).context("照合に失敗しました")? {
                println!("Passwords match");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("Not a match");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn run_json(cmd: JsonCommand, config: &Config) -> Result<ExitCode> {
    let output = match cmd {
        JsonCommand::Beautify(input) => json::beautify(&read_input(input)?)?,
        JsonCommand::Minify(input) => json::minify(&read_input(input)?)?,
        JsonCommand::Repair { input, pretty } => {
            let layout = if pretty {
                json::JsonLayout::Pretty
            } else {
                config.json.layout
            };
            json::repair_with_layout(&read_input(input)?, layout)?
        }
    };
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

fn run_password(cmd: PasswordCommand, config: &Config) -> Result<ExitCode> {
    match cmd {
        PasswordCommand::List => {
            for name in password::list_names() {
                println!("{name}");
            }
        }
        PasswordCommand::Generate {
            strength,
            count,
            strict,
        } => {
            let count = count.unwrap_or(config.generator.batch_count);
            let policy = if strict {
                BatchPolicy::Propagate
            } else {
                config.generator.batch_policy
            };

            match strength {
                Some(name) => {
                    let profile = password::resolve(&name)?;
                    let keys =
                        password::generate_many_with(&SystemEntropy, count, profile, policy)?;
                    for key in keys {
                        println!("{key}");
                    }
                }
                None => {
                    // 全強度をカタログ順に
                    for profile in password::profiles() {
                        println!("{}", profile.name);
                        let keys =
                            password::generate_many_with(&SystemEntropy, count, profile, policy)?;
                        for key in keys {
                            println!("  {key}");
                        }
                    }
                }
            }
        }
        PasswordCommand::Custom {
            length,
            lower,
            upper,
            digits,
            special,
            hex,
            count,
        } => {
            let pool = password::build_pool(ClassSet::new(lower, upper, digits, special, hex));
            for _ in 0..count {
                println!("{}", password::generate_key(length, &pool)?);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_rsa(cmd: RsaCommand, config: &Config) -> Result<ExitCode> {
    match cmd {
        RsaCommand::Generate { bits, out_dir } => {
            let size = RsaKeySize::try_from(bits.unwrap_or(config.rsa.key_size))?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?,
            );
            spinner.set_message(format!("{size} のキーを生成中..."));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let start_time = Instant::now();
            let pair = keypair::generate_keypair(size);
            spinner.finish_and_clear();
            let pair = pair?;
            eprintln!("Generated in {:.6} seconds", start_time.elapsed().as_secs_f64());

            match out_dir {
                Some(dir) => {
                    fs::create_dir_all(&dir).with_context(|| {
                        format!("出力ディレクトリの作成に失敗: {}", dir.display())
                    })?;
                    let private_path = dir.join("private.pem");
                    let public_path = dir.join("public.pem");
                    fs::write(&private_path, &pair.private_pem).with_context(|| {
                        format!("秘密鍵の書き込みに失敗: {}", private_path.display())
                    })?;
                    fs::write(&public_path, &pair.public_pem).with_context(|| {
                        format!("公開鍵の書き込みに失敗: {}", public_path.display())
                    })?;
                    println!("{}", private_path.display());
                    println!("{}", public_path.display());
                }
                None => {
                    print!("{}", pair.private_pem);
                    print!("{}", pair.public_pem);
                }
            }
        }
        RsaCommand::Encrypt { public_key, input } => {
            let pem = read_pem(&public_key)?;
            let message = read_input(input)?;
            println!("{}", keypair::encrypt(&message, &pem)?);
        }
        RsaCommand::Decrypt { private_key, input } => {
            let pem = read_pem(&private_key)?;
            let encrypted = read_input(input)?;
            println!("{}", keypair::decrypt(&encrypted, &pem)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_config(cmd: ConfigCommand, config_path: Option<&Path>) -> Result<ExitCode> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => get_default_config_path()?,
    };

    match cmd {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                bail!("設定ファイルは既に存在します: {}（--force で上書き）", path.display());
            }
            create_config_file(&path)?;
            println!("設定ファイルを作成しました: {}", path.display());
        }
        ConfigCommand::Show => print!("{}", render_config(&load(config_path)?)?),
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Delete => {
            delete_config_file(&path)?;
            println!("設定ファイルを削除しました: {}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
