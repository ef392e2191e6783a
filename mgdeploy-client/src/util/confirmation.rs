/*
 * This file is part of mgdeploy, licensed under the MIT License (MIT).
 *
 * Copyright (c) 2024 easybill GmbH
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use anyhow::Context;
use dialoguer::Confirm;
use is_terminal::IsTerminal;
use log::warn;

/// Asks the user whether a state changing action should be executed.
pub(crate) trait ConfirmationPrompt {
    /// Displays the given message for the given target, returning `true` if the action was confirmed.
    ///
    /// # Arguments
    /// * `message` - The question to display.
    /// * `target` - The name of the resource that is affected by the action.
    fn confirm(&mut self, message: &str, target: &str) -> anyhow::Result<bool>;
}

/// Prompts on the terminal. If no interactive terminal is attached the prompt is skipped and the action confirmed.
pub(crate) struct TerminalPrompt;

impl ConfirmationPrompt for TerminalPrompt {
    fn confirm(&mut self, message: &str, target: &str) -> anyhow::Result<bool> {
        if !std::io::stderr().is_terminal() {
            warn!(
                "No interactive terminal attached, continuing without confirmation for {}",
                target
            );
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(format!("{} (target: {})", message, target))
            .default(false)
            .interact()
            .context("unable to read confirmation from terminal")
    }
}
