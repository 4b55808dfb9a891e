use crate::models::{Movie, Recommendation};

/// Provider of the content shown before the user asks for anything
///
/// Implementations must be pure: every call returns the same data and no
/// state is shared between calls.
pub trait SampleData: Send + Sync {
    /// Seed movies pre-filled into the input
    fn seed_movies(&self) -> Vec<Movie>;

    /// Recommendations shown for the sample seeds
    fn recommendations(&self) -> Vec<Recommendation>;
}

/// Built-in sample content
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSamples;

/// Sample provider with no content, for deployments that start blank
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSamples;

impl SampleData for NoSamples {
    fn seed_movies(&self) -> Vec<Movie> {
        vec![]
    }

    fn recommendations(&self) -> Vec<Recommendation> {
        vec![]
    }
}

fn reasons(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SampleData for BuiltinSamples {
    fn seed_movies(&self) -> Vec<Movie> {
        [
            (
                603,
                "The Matrix (1999)",
                "https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            ),
            (
                335984,
                "Blade Runner 2049 (2017)",
                "https://image.tmdb.org/t/p/w500/gajva2L0rPYkEWjzgFlBXCAVBE5.jpg",
            ),
            (550, "Fight Club (1999)", "/fight-club.jpeg"),
        ]
        .into_iter()
        .map(|(id, title, poster)| Movie {
            id,
            title: title.to_string(),
            poster_path: Some(poster.to_string()),
            is_sample: true,
        })
        .collect()
    }

    fn recommendations(&self) -> Vec<Recommendation> {
        vec![
            Recommendation::new(
                "Inception",
                "You're drawn to narratives that challenge perception and immerse you in intricately constructed worlds, much like the simulated realities of 'The Matrix' and the complex moral landscapes of 'Blade Runner 2049'. 'Inception' will captivate you with its ingenious premise of dream-sharing and its relentless exploration of what is real, offering both thrilling action and profound intellectual puzzles.",
                reasons(&[
                    "Features a complex, non-linear narrative that blurs the lines between reality and simulation, reminiscent of 'The Matrix'.",
                    "Explores deeply philosophical questions about identity, memory, and the nature of perceived reality, akin to 'Blade Runner 2049'.",
                    "Delivers breathtaking visual effects and a meticulously crafted world that elevates the narrative beyond mere spectacle.",
                ]),
            )
            .with_poster(Some("/inception.webp".to_string()))
            .as_sample(),
            Recommendation::new(
                "Dark City",
                "Given your appreciation for the existential questions and manufactured realities in 'The Matrix' and the noir-infused dystopia of 'Blade Runner 2049', 'Dark City' is a quintessential experience. It masterfully weaves a tale of a man who wakes up in a city where reality is constantly being altered, forcing him to uncover the truth about himself and his world.",
                reasons(&[
                    "Presents a chilling dystopian setting and the revelation of a hidden, manufactured reality, strikingly similar to 'The Matrix'.",
                    "Employs a brooding, atmospheric film noir aesthetic combined with existential dread, much like the world of 'Blade Runner 2049'.",
                    "Features a protagonist grappling with fragmented memories and a lost identity in a sinister urban landscape, echoing themes from all three of your favorites.",
                ]),
            )
            .with_poster(Some("/dark-city.webp".to_string()))
            .as_sample(),
            Recommendation::new(
                "Mr. Nobody (2009)",
                "Your fascination with free will, identity, and the branching paths of existence evident in 'The Matrix' and 'Blade Runner 2049' will find a rich canvas in 'Mr. Nobody'. This visually stunning and emotionally resonant film delves into the myriad lives a single person could live, prompting deep reflection on choices, fate, and the nature of reality itself.",
                reasons(&[
                    "Explores profound philosophical concepts of free will, determinism, and the nature of choice, much like the underlying questions in 'The Matrix'.",
                    "Offers a non-linear narrative and a protagonist grappling with multiple identities across divergent timelines, similar to the psychological complexity in 'Fight Club'.",
                    "Boasts stunning, atmospheric visuals and a melancholic tone that resonates with the introspective quality of 'Blade Runner 2049'.",
                ]),
            )
            .with_poster(Some("/mr.nobody.webp".to_string()))
            .as_sample(),
            Recommendation::new(
                "Gattaca",
                "Your appreciation for dystopian futures, the struggle for individuality, and the quiet intensity of films like 'Blade Runner 2049' suggests you'll find 'Gattaca' incredibly compelling. It's a beautifully crafted vision of a future where genetic destiny dictates life, and one man's rebellion against this system speaks to the core themes of identity and free will you enjoy.",
                reasons(&[
                    "Features a sleek, near-future dystopian setting where individuals struggle against a predetermined system, mirroring the fight for freedom in 'The Matrix'.",
                    "Presents a contemplative and atmospheric tone, rich with existential questions about what it means to be human and unique, similar to 'Blade Runner 2049'.",
                    "Explores a protagonist's struggle for identity and self-determination against societal constraints, echoing the anti-establishment undercurrents of 'Fight Club'.",
                ]),
            )
            .with_poster(Some("/gattaca.webp".to_string()))
            .as_sample(),
        ]
    }
}
