//! # Janela de Contexto Deslizante
//!
//! Para cada token da sentença, produz o token em foco, até `k` tokens
//! anteriores e até `k` tokens seguintes. Nas bordas a janela simplesmente
//! encolhe: não há preenchimento nem volta ao início.
//!
//! A janela não copia nada: cada contexto é um par de fatias da sentença
//! original. Iterar é preguiçoso e a mesma janela pode ser percorrida
//! quantas vezes for preciso.
//!
//! ```rust
//! use wsd_core::window::ContextWindow;
//!
//! let words = ["the", "bank", "lent", "money"];
//! let window = ContextWindow::new(&words, 1);
//! let ctx = window.iter().nth(1).unwrap();
//! assert_eq!(*ctx.focus, "bank");
//! assert_eq!(ctx.previous, &["the"]);
//! assert_eq!(ctx.next, &["lent"]);
//! ```

/// Janela de raio fixo sobre uma sequência de tokens.
#[derive(Debug)]
pub struct ContextWindow<'a, T> {
    tokens: &'a [T],
    radius: usize,
}

impl<T> Clone for ContextWindow<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextWindow<'_, T> {}

impl<'a, T> ContextWindow<'a, T> {
    pub fn new(tokens: &'a [T], radius: usize) -> Self {
        Self { tokens, radius }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Número de contextos produzidos (um por token).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Contexto do token no índice dado, sem percorrer a sequência.
    pub fn at(&self, index: usize) -> Option<WindowContext<'a, T>> {
        let focus = self.tokens.get(index)?;
        let start = index.saturating_sub(self.radius);
        let end = index
            .saturating_add(self.radius)
            .saturating_add(1)
            .min(self.tokens.len());
        Some(WindowContext {
            index,
            focus,
            previous: &self.tokens[start..index],
            next: &self.tokens[index + 1..end],
        })
    }

    pub fn iter(&self) -> WindowIter<'a, T> {
        WindowIter {
            window: *self,
            position: 0,
        }
    }
}

impl<'a, T> IntoIterator for ContextWindow<'a, T> {
    type Item = WindowContext<'a, T>;
    type IntoIter = WindowIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &ContextWindow<'a, T> {
    type Item = WindowContext<'a, T>;
    type IntoIter = WindowIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Um token em foco com seus vizinhos.
#[derive(Debug)]
pub struct WindowContext<'a, T> {
    /// Posição do foco na sentença.
    pub index: usize,
    pub focus: &'a T,
    /// Tokens anteriores, em ordem da sentença.
    pub previous: &'a [T],
    /// Tokens seguintes, em ordem da sentença.
    pub next: &'a [T],
}

impl<'a, T> WindowContext<'a, T> {
    /// Anteriores seguidos dos seguintes (o foco não entra).
    pub fn context(&self) -> impl Iterator<Item = &'a T> {
        self.previous.iter().chain(self.next.iter())
    }
}

/// Iterador sobre os contextos de uma [`ContextWindow`].
#[derive(Debug)]
pub struct WindowIter<'a, T> {
    window: ContextWindow<'a, T>,
    position: usize,
}

impl<'a, T> Iterator for WindowIter<'a, T> {
    type Item = WindowContext<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let ctx = self.window.at(self.position)?;
        self.position += 1;
        Some(ctx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for WindowIter<'_, T> {}
