//! The browser chat page served at `/`.
//!
//! A single self-contained HTML document: inline styles, a message list, an
//! input form, and a script that posts to `/api/chat`.

/// The chat widget page.
pub const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Gemini Agent</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
        }
        .container {
            width: 90%;
            max-width: 800px;
            height: 90vh;
            background: white;
            border-radius: 20px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
            display: flex;
            flex-direction: column;
        }
        .header {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 20px 30px;
            border-radius: 20px 20px 0 0;
            font-size: 20px;
            font-weight: 600;
        }
        .chat-area {
            flex: 1;
            overflow-y: auto;
            padding: 20px 30px;
            background: #f7f7f8;
        }
        .message {
            margin-bottom: 15px;
            display: flex;
            align-items: flex-start;
        }
        .message.user { justify-content: flex-end; }
        .message-content {
            max-width: 70%;
            padding: 12px 18px;
            border-radius: 18px;
            line-height: 1.5;
            word-wrap: break-word;
            white-space: pre-wrap;
        }
        .message.user .message-content {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
        }
        .message.agent .message-content {
            background: white;
            border: 1px solid #e0e0e0;
            color: #333;
        }
        .message.error .message-content {
            background: #fdecea;
            border: 1px solid #f5c6cb;
            color: #a94442;
        }
        .input-area {
            padding: 20px 30px;
            background: white;
            border-radius: 0 0 20px 20px;
            border-top: 1px solid #e0e0e0;
        }
        .input-form {
            display: flex;
            gap: 10px;
        }
        #message-input {
            flex: 1;
            padding: 12px 18px;
            border: 2px solid #e0e0e0;
            border-radius: 25px;
            font-size: 15px;
            outline: none;
            transition: border-color 0.3s;
        }
        #message-input:focus {
            border-color: #667eea;
        }
        #send-button {
            padding: 12px 30px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            border: none;
            border-radius: 25px;
            font-size: 15px;
            font-weight: 600;
            cursor: pointer;
            transition: transform 0.2s;
        }
        #send-button:hover {
            transform: scale(1.05);
        }
        #send-button:disabled {
            opacity: 0.6;
            cursor: not-allowed;
        }
        .loading {
            display: none;
            padding: 12px 18px;
            background: white;
            border: 1px solid #e0e0e0;
            border-radius: 18px;
            color: #666;
        }
        .loading.show { display: block; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">Gemini Agent</div>
        <div class="chat-area" id="chat-area">
            <div class="message agent">
                <div class="message-content">Hi! Ask me anything.</div>
            </div>
            <div class="loading" id="loading">Thinking&hellip;</div>
        </div>
        <div class="input-area">
            <form class="input-form" id="chat-form">
                <input type="text" id="message-input" placeholder="Type a message..." autocomplete="off" autofocus>
                <button type="submit" id="send-button">Send</button>
            </form>
        </div>
    </div>
    <script>
        const chatArea = document.getElementById('chat-area');
        const form = document.getElementById('chat-form');
        const input = document.getElementById('message-input');
        const sendButton = document.getElementById('send-button');
        const loading = document.getElementById('loading');
        const sessionId = (crypto.randomUUID && crypto.randomUUID()) || 'web_session';

        function addMessage(text, role) {
            const wrapper = document.createElement('div');
            wrapper.className = 'message ' + role;
            const content = document.createElement('div');
            content.className = 'message-content';
            content.textContent = text;
            wrapper.appendChild(content);
            chatArea.insertBefore(wrapper, loading);
            chatArea.scrollTop = chatArea.scrollHeight;
        }

        form.addEventListener('submit', async (e) => {
            e.preventDefault();
            const message = input.value.trim();
            if (!message) return;

            addMessage(message, 'user');
            input.value = '';
            sendButton.disabled = true;
            loading.classList.add('show');
            chatArea.scrollTop = chatArea.scrollHeight;

            try {
                const res = await fetch('/api/chat', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ message: message, session_id: sessionId }),
                });
                const data = await res.json();
                if (res.ok) {
                    addMessage(data.response, 'agent');
                } else {
                    addMessage('Error: ' + (data.error || res.statusText), 'error');
                }
            } catch (err) {
                addMessage('Error: ' + err.message, 'error');
            } finally {
                sendButton.disabled = false;
                loading.classList.remove('show');
                input.focus();
            }
        });
    </script>
</body>
</html>
"#;
