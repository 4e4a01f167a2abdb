//! The poolside scene: NPCs with their dialogue trees and scripted objects.
//!
//! Hardcoded for now; every NPC graph is validated when built, so a typo in
//! a reply target fails at startup instead of mid-conversation.

use poolside_shared::{DialogueNode, DialogueResponse, Facing, ObjectKind};

use crate::entities::{ServerNpc, ServerObject};
use crate::error::GameResult;

fn node(id: &str, text: &str, responses: Vec<DialogueResponse>) -> DialogueNode {
    DialogueNode {
        id: id.to_string(),
        text: text.to_string(),
        responses,
    }
}

fn reply(text: &str, next: &str) -> DialogueResponse {
    DialogueResponse::leads_to(text, next)
}

fn bye(text: &str) -> DialogueResponse {
    DialogueResponse::farewell(text)
}

/// All NPCs in scene order
pub fn poolside_npcs() -> GameResult<Vec<ServerNpc>> {
    Ok(vec![lifeguard()?, pool_attendant()?, sunbather()?, pool_chef()?])
}

fn lifeguard() -> GameResult<ServerNpc> {
    ServerNpc::new(
        "lifeguard",
        "Marina",
        [400.0, 150.0],
        Facing::Down,
        "lifeguard.png",
        "A vigilant lifeguard watching over the pool",
        vec![
            node(
                "greeting",
                "Welcome to Sunny Pool Resort! I'm Marina, your lifeguard for today.",
                vec![
                    reply("Hi there! This place looks amazing!", "about_pool"),
                    reply("Are there any safety rules I should know?", "safety_rules"),
                    bye("Thanks, I'll just look around."),
                ],
            ),
            node(
                "about_pool",
                "Isn't it beautiful? We just renovated the pool area last month. The water is perfectly temperature controlled!",
                vec![
                    reply("The renovation really paid off!", "weather_chat"),
                    reply("What else is new around here?", "whats_new"),
                    bye("I should get going now."),
                ],
            ),
            node(
                "safety_rules",
                "Of course! No running around the pool, no diving in the shallow end, and please shower before entering the water.",
                vec![
                    reply("Got it, thanks for the heads up!", "helpful_tips"),
                    reply("Are there any other facilities here?", "facilities"),
                    bye("I'll be careful. See you around!"),
                ],
            ),
            node(
                "weather_chat",
                "Perfect weather for swimming today! The forecast says it'll stay sunny all week.",
                vec![bye("That's great news!"), bye("I love sunny weather!")],
            ),
            node(
                "whats_new",
                "We added a new juice bar by the north side, and there's a beach volleyball court being built!",
                vec![
                    bye("A juice bar sounds refreshing!"),
                    bye("Volleyball court? Count me in!"),
                ],
            ),
            node(
                "helpful_tips",
                "Also, if you need sunscreen, there's a dispenser by the entrance. Stay hydrated!",
                vec![bye("Thanks for looking out for us!")],
            ),
            node(
                "facilities",
                "We have changing rooms, showers, a snack bar, and rental equipment for pool games!",
                vec![bye("Sounds like everything I need is here!")],
            ),
        ],
    )
}

fn pool_attendant() -> GameResult<ServerNpc> {
    ServerNpc::new(
        "pool_attendant",
        "Carlos",
        [200.0, 350.0],
        Facing::Left,
        "attendant.png",
        "A friendly pool attendant maintaining the area",
        vec![
            node(
                "greeting",
                "Hey there! I'm Carlos, the pool attendant. Just finished cleaning the pool filters!",
                vec![
                    reply("Thanks for keeping everything clean!", "maintenance_chat"),
                    reply("The water looks crystal clear!", "water_quality"),
                    bye("Keep up the good work!"),
                ],
            ),
            node(
                "maintenance_chat",
                "It's my pleasure! I take pride in maintaining this beautiful space for everyone to enjoy.",
                vec![
                    reply("How long have you worked here?", "work_history"),
                    reply("What's the most challenging part?", "challenges"),
                    bye("Well, I appreciate your dedication!"),
                ],
            ),
            node(
                "water_quality",
                "I test the water chemistry twice daily! pH levels are perfect, and chlorine is just right.",
                vec![
                    reply("That attention to detail is impressive!", "detail_oriented"),
                    bye("No wonder the water feels so good!"),
                ],
            ),
            node(
                "work_history",
                "I've been here for three years now. Started as a summer job, but I love the outdoor work!",
                vec![
                    bye("That's awesome you found your calling!"),
                    bye("Outdoor work does seem nice!"),
                ],
            ),
            node(
                "challenges",
                "Probably the early morning setup and late evening cleanup, but seeing happy families makes it worth it!",
                vec![bye("Your hard work really shows!")],
            ),
            node(
                "detail_oriented",
                "Thanks! Safety and cleanliness are my top priorities. Happy swimmers make for a great day!",
                vec![bye("We definitely appreciate it!")],
            ),
        ],
    )
}

fn sunbather() -> GameResult<ServerNpc> {
    ServerNpc::new(
        "sunbather",
        "Sophie",
        [350.0, 280.0],
        Facing::Up,
        "sunbather.png",
        "A relaxed guest enjoying the sun",
        vec![
            node(
                "greeting",
                "*adjusts sunglasses* Oh hi! Beautiful day for some sun, isn't it?",
                vec![
                    reply("Absolutely! Perfect weather for relaxing!", "relaxation"),
                    reply("You seem to have the right idea!", "vacation_mode"),
                    bye("Enjoy your sunbathing!"),
                ],
            ),
            node(
                "relaxation",
                "I drove two hours to get here, but it's so worth it! This place has the most peaceful vibe.",
                vec![
                    reply("Two hours? That's dedication to relaxation!", "dedication"),
                    reply("It really is peaceful here!", "peaceful_vibes"),
                    bye("Hope you enjoy every minute!"),
                ],
            ),
            node(
                "vacation_mode",
                "Vacation mode: activated! No emails, no stress, just vitamin D and good vibes!",
                vec![
                    reply("That sounds like the perfect vacation!", "perfect_vacation"),
                    reply("I should adopt that mindset too!", "mindset_advice"),
                    bye("Enjoy your digital detox!"),
                ],
            ),
            node(
                "dedication",
                "When you find a good spot, you stick with it! Plus, they have the best poolside service.",
                vec![bye("Good service makes all the difference!")],
            ),
            node(
                "peaceful_vibes",
                "Right? The sound of the water, the gentle breeze... it's like natural meditation.",
                vec![bye("I can definitely feel the zen here!")],
            ),
            node(
                "perfect_vacation",
                "Sometimes the simplest pleasures are the best ones. Sun, water, and zero schedule!",
                vec![bye("Couldn't agree more!")],
            ),
            node(
                "mindset_advice",
                "Do it! Leave the phone in the bag and just... be present. It's surprisingly refreshing!",
                vec![bye("Great advice, I'll try that!")],
            ),
        ],
    )
}

fn pool_chef() -> GameResult<ServerNpc> {
    ServerNpc::new(
        "pool_chef",
        "Giuseppe",
        [100.0, 100.0],
        Facing::Right,
        "chef.png",
        "The enthusiastic poolside snack bar chef",
        vec![
            node(
                "greeting",
                "*waves spatula enthusiastically* Ciao! I'm Giuseppe, chef of the poolside kitchen! Hungry for something delicious?",
                vec![
                    reply("What's on the menu today?", "menu"),
                    reply("What's your specialty?", "specialty"),
                    bye("Maybe later, thanks!"),
                ],
            ),
            node(
                "menu",
                "Today we have fresh fish tacos, tropical fruit salads, and my famous poolside pizza! Everything made fresh!",
                vec![
                    reply("Fish tacos sound amazing!", "fish_tacos"),
                    reply("Poolside pizza? That's unique!", "poolside_pizza"),
                    bye("I'll think about it!"),
                ],
            ),
            node(
                "specialty",
                "Ah, my specialty! Grilled pineapple with honey and mint - perfect after a swim! Light but satisfying!",
                vec![
                    reply("That sounds incredibly refreshing!", "refreshing_food"),
                    reply("You really know poolside cuisine!", "cuisine_expert"),
                    bye("I might have to try that!"),
                ],
            ),
            node(
                "fish_tacos",
                "Fresh mahi-mahi, cabbage slaw, and my secret mango salsa! Caught this morning, I guarantee!",
                vec![
                    reply("You really care about freshness!", "freshness_matters"),
                    bye("Secret mango salsa? Intriguing!"),
                ],
            ),
            node(
                "poolside_pizza",
                "Light crust, fresh mozzarella, cherry tomatoes, and basil! No heavy toppings - perfect for swimming!",
                vec![bye("Smart thinking for poolside dining!")],
            ),
            node(
                "refreshing_food",
                "Exactly! Food should complement the experience, not weigh you down. Light, fresh, flavorful!",
                vec![bye("You're a philosopher of poolside cuisine!")],
            ),
            node(
                "cuisine_expert",
                "Twenty years in restaurants, but poolside cooking? That's my true passion! It's all about the atmosphere!",
                vec![bye("Your passion really shows!")],
            ),
            node(
                "freshness_matters",
                "Always! Fresh ingredients, fresh air, fresh start to your day! That's the Giuseppe way!",
                vec![bye("I love that philosophy!")],
            ),
        ],
    )
}

/// All scripted objects in scene order
pub fn poolside_objects() -> Vec<ServerObject> {
    vec![
        ServerObject::new(
            "pool_ball",
            ObjectKind::Kickable,
            [300.0, 200.0],
            "ball.png",
            "Pool Ball",
            "A colorful beach ball floating by the pool",
        ),
        ServerObject::new(
            "pool_chair1",
            ObjectKind::Sittable,
            [150.0, 250.0],
            "chair.png",
            "Pool Chair",
            "A comfortable lounge chair perfect for sunbathing",
        ),
        ServerObject::new(
            "umbrella1",
            ObjectKind::Interactive,
            [180.0, 220.0],
            "umbrella.png",
            "Beach Umbrella",
            "A large umbrella providing shade from the sun",
        ),
    ]
}
