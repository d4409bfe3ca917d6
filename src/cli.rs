use clap::Parser;

use crate::compute::DEFAULT_REGION;
use crate::logs::{DEFAULT_LOOKBACK_MINUTES, DEFAULT_STREAM_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "scan-logs")]
#[command(about = "Scan the most recent CloudWatch log streams of a group for a pattern")]
pub struct ScanLogsCli {
    /// Log group to scan
    #[arg(long, env = "LOG_GROUP_NAME", default_value = "/aws/lambda/your-log-group-name")]
    pub log_group: String,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// CloudWatch Logs filter pattern
    #[arg(short = 'p', long, env = "FILTER_PATTERN", default_value = "ERROR")]
    pub pattern: String,

    /// How far back to look, in minutes
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_MINUTES)]
    pub lookback_minutes: u32,

    /// Number of most recent streams to scan
    #[arg(long, default_value_t = DEFAULT_STREAM_LIMIT)]
    pub limit: i32,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "disk-monitor")]
#[command(about = "Email an alert when filesystem usage crosses a threshold")]
pub struct DiskMonitorCli {
    /// Usage percentage above which an alert is sent
    #[arg(long, env = "DISK_USAGE_THRESHOLD", default_value = "80")]
    pub threshold: String,

    /// Any path on the filesystem to check
    #[arg(long, env = "DISK_USAGE_PATH", default_value = "/")]
    pub path: String,

    /// Alert sender address
    #[arg(long, env = "ALERT_EMAIL_FROM", default_value = "devops@yourdomain.com")]
    pub from: String,

    /// Alert recipient address
    #[arg(long, env = "ALERT_EMAIL_TO", default_value = "admin@yourdomain.com")]
    pub to: String,

    /// SMTP relay host
    #[arg(long, env = "SMTP_SERVER", default_value = "smtp.yourdomain.com")]
    pub smtp_server: String,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value = "25")]
    pub smtp_port: String,

    /// SMTP username (enables STARTTLS and auth together with the password)
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "auto-stop")]
#[command(about = "Stop running EC2 instances tagged AutoStop=true")]
pub struct AutoStopCli {
    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
