use crate::binary_tree::Tree;
use crate::error::TreeError;
use crate::perf::{BenchConfig, run_benchmark};
use rand::Rng;
use std::io::{self, BufRead, Write};

const MENU: &str = "\n1. Add Node\n2. Remove Node\n3. Display Tree\n4. Find Maximum\n5. Run Performance Test\n6. Exit\nEnter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Add,
    Remove,
    Display,
    FindMaximum,
    Benchmark,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Choice> {
        match input.trim() {
            "1" => Some(Choice::Add),
            "2" => Some(Choice::Remove),
            "3" => Some(Choice::Display),
            "4" => Some(Choice::FindMaximum),
            "5" => Some(Choice::Benchmark),
            "6" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// A menu loop driving one tree from line-based input.
pub struct Session<R, W, G> {
    input: R,
    output: W,
    rng: G,
    bench: BenchConfig,
    tree: Tree<i64>,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(input: R, output: W, rng: G, bench: BenchConfig) -> Self {
        Session {
            input,
            output,
            rng,
            bench,
            tree: Tree::new(),
        }
    }

    pub fn tree(&self) -> &Tree<i64> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree<i64> {
        &mut self.tree
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the exit choice or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            match Choice::parse(&line) {
                Some(Choice::Add) => {
                    if let Some(value) = self.prompt_value("Enter value to add: ")? {
                        self.tree.add(value);
                    }
                }
                Some(Choice::Remove) => {
                    if let Some(value) = self.prompt_value("Enter value to remove: ")? {
                        if !self.tree.remove(&value) {
                            log::debug!("{value} not present, nothing removed");
                        }
                    }
                }
                Some(Choice::Display) => {
                    writeln!(self.output, "BST Structure:")?;
                    write!(self.output, "{}", self.tree)?;
                }
                Some(Choice::FindMaximum) => match self.tree.find_maximum() {
                    Ok(max) => writeln!(self.output, "Maximum value in BST: {max}")?,
                    Err(TreeError::Empty) => writeln!(self.output, "Tree is empty.")?,
                },
                Some(Choice::Benchmark) => {
                    for timing in run_benchmark(&mut self.tree, &self.bench, &mut self.rng) {
                        writeln!(self.output, "{timing}")?;
                    }
                }
                Some(Choice::Exit) => break,
                None => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
        writeln!(self.output, "Exiting program.")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt_value(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Invalid value.")?;
                Ok(None)
            }
        }
    }
}
