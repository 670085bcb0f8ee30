//! Interactive menu loop

use colored::*;
use std::collections::BTreeMap;
use std::io::{self, Write};

use faqd_core::{FaqEntry, Result};

use crate::client::ApiClient;

/// Run the interactive menu against a faqd server until the user exits
pub async fn run_menu(client: &ApiClient) -> Result<()> {
    loop {
        println!("{}", "Select Options".bold());
        println!("1: get faq list");
        println!("2: add faq in faq list");
        println!("3: delete faq in faq list");
        println!("4: search in faq list by query");
        println!("5: get realtime generated answer by llm");
        println!("6: Exit");
        println!();

        let option = read_line("Option: ")?;

        match option.as_str() {
            "1" => match client.get_faq().await {
                Ok(listed) => print_faq_list(&listed),
                Err(e) => print_error(&e),
            },
            "2" => {
                let question = read_line("Q: ")?;
                let answer = read_line("A: ")?;
                match client.add_faq(&question, &answer).await {
                    Ok(listed) => print_faq_list(&listed),
                    Err(e) => print_error(&e),
                }
            }
            "3" => {
                let idx = read_line("idx: ")?;
                match idx.parse::<usize>() {
                    Ok(idx) => match client.delete_faq(idx).await {
                        Ok(listed) => print_faq_list(&listed),
                        Err(e) => print_error(&e),
                    },
                    Err(_) => println!("{}", "idx must be a number".red()),
                }
            }
            "4" => {
                let query = read_line("Q: ")?;
                let topk = read_line("topk: ")?;
                match topk.parse::<usize>() {
                    Ok(topk) => match client.search_faq(&query, topk).await {
                        Ok(answers) => print_answers(&answers),
                        Err(e) => print_error(&e),
                    },
                    Err(_) => println!("{}", "topk must be a number".red()),
                }
            }
            "5" => {
                let query = read_line("Q: ")?;
                match client.search_realtime(&query).await {
                    Ok(result) => {
                        println!("{}", query);
                        println!("{} {}", "A:".green().bold(), result.answer);
                        for url in &result.url_list {
                            println!("  {} {}", "source:".dimmed(), url);
                        }
                    }
                    Err(e) => print_error(&e),
                }
            }
            _ => break,
        }

        println!("{}", "#######################################".dimmed());
    }

    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt.cyan());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn print_faq_list(listed: &BTreeMap<usize, FaqEntry>) {
    for (position, entry) in listed {
        println!("index: {}", position);
        println!("{} {}", "Q:".bold(), entry.question);
        println!("{} {}", "A:".bold(), entry.answer);
        println!();
    }
}

fn print_answers(answers: &BTreeMap<usize, String>) {
    for (rank, answer) in answers {
        println!("{}: {}", rank, answer);
    }
}

fn print_error(error: &faqd_core::Error) {
    println!("{} {}", "error:".red().bold(), error);
}
