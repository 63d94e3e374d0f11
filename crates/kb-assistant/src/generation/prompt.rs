//! Prompt templates for grounded answers

use crate::types::chat::ContextChunk;

/// Separator between context blocks
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Prompt builder for knowledge-grounded questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full prompt: fixed instruction preamble, context blocks
    /// (or an explicit no-context note), then the user question.
    pub fn build(question: &str, context: &[ContextChunk]) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "You are a helpful AI assistant that answers questions based on the provided knowledge base. \n\
             If the question can be answered using the knowledge base, provide a detailed answer with references to the source material.\n\
             If the information is not in the knowledge base, politely say so and offer to help with what you know.\n\n",
        );

        if context.is_empty() {
            prompt.push_str(
                "Note: No relevant knowledge base context was found. Please inform the user that they need to upload knowledge base files first.\n\n",
            );
        } else {
            prompt.push_str("Knowledge Base Context:\n");
            let blocks: Vec<String> = context
                .iter()
                .map(|chunk| format!("[{}]\n{}", chunk.file_name, chunk.content))
                .collect();
            prompt.push_str(&blocks.join(CONTEXT_SEPARATOR));
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!("User Question: {}", question));

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(file: &str, content: &str) -> ContextChunk {
        ContextChunk {
            file_name: file.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn context_blocks_carry_file_names_and_separators() {
        let prompt = PromptBuilder::build(
            "What does the fox do?",
            &[ctx("fox.txt", "The fox jumps."), ctx("dog.txt", "The dog sleeps.")],
        );

        assert!(prompt.contains("[fox.txt]\nThe fox jumps."));
        assert!(prompt.contains("[dog.txt]\nThe dog sleeps."));
        assert!(prompt.contains("\n\n---\n\n"));
        assert!(prompt.ends_with("User Question: What does the fox do?"));
    }

    #[test]
    fn empty_context_adds_the_upload_note() {
        let prompt = PromptBuilder::build("Anything?", &[]);
        assert!(prompt.contains("No relevant knowledge base context was found"));
        assert!(!prompt.contains("Knowledge Base Context:"));
        assert!(prompt.ends_with("User Question: Anything?"));
    }
}
