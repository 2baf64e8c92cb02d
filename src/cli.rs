use clap::{Parser, Subcommand};

/// `Secretary` - personal assistant that files ideas and tasks from chat.
#[derive(Parser, Debug)]
#[command(name = "secretary")]
#[command(version)]
#[command(about = "Files ideas and planning tasks sent by chat into your notes backend.", long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Long-poll Telegram and answer every allowed message
    Serve,

    /// Run one message through the pipeline and print the reply
    Ask {
        /// Message text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the interest/area taxonomy from the backend
    Categories,
}
