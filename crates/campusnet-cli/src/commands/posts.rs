//! Post commands: feed, publish, thread, comment, reply, like.

use super::{parse_comment, parse_post, parse_user};
use crate::cli::{CommentArgs, PostArgs, ReplyArgs, ThreadArgs};
use crate::error::Result;
use crate::output::Formatter;
use campusnet_sdk::CampusClient;

/// Execute the feed command.
pub async fn execute_feed(client: &mut CampusClient, formatter: &Formatter) -> Result<()> {
    let entries = client.feed().await?;
    println!("{}", formatter.format_feed(&entries)?);
    Ok(())
}

/// Execute the post command.
pub async fn execute_post(
    args: PostArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let post = client.publish_post(&args.content, &args.image).await?;
    println!(
        "{}",
        formatter.success(&format!("Posted {}", post.post_id))
    );
    Ok(())
}

/// Execute the thread command.
pub async fn execute_thread(
    args: ThreadArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let author = parse_user(&args.author)?;
    let post = parse_post(&args.post)?;
    let thread = client.thread(&author, &post).await?;
    println!("{}", formatter.format_thread(&thread)?);
    Ok(())
}

/// Execute the comment command.
pub async fn execute_comment(
    args: CommentArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let author = parse_user(&args.author)?;
    let post = parse_post(&args.post)?;
    let comment = client.add_comment(&author, &post, &args.content).await?;
    println!(
        "{}",
        formatter.success(&format!("Commented {}", comment.comment_id))
    );
    Ok(())
}

/// Execute the reply command.
pub async fn execute_reply(
    args: ReplyArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let author = parse_user(&args.author)?;
    let post = parse_post(&args.post)?;
    let comment = parse_comment(&args.comment)?;
    let tagged = match args.tag {
        Some(raw) => Some(parse_user(&raw)?),
        None => None,
    };

    let reply = client
        .add_reply(&author, &post, &comment, &args.content, tagged)
        .await?;
    println!(
        "{}",
        formatter.success(&format!("Replied {}", reply.reply_id))
    );
    Ok(())
}

/// Execute the like command.
pub async fn execute_like(
    args: ThreadArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let author = parse_user(&args.author)?;
    let post = parse_post(&args.post)?;
    let like = client.like_post(&author, &post).await?;

    let message = if like.liked {
        format!("Liked ({} total)", like.like_count)
    } else {
        format!("Unliked ({} total)", like.like_count)
    };
    println!("{}", formatter.success(&message));
    Ok(())
}
